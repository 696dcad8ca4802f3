//! # Seed Data Generator
//!
//! Populates the store with a sample farm for development and prints the
//! computed dashboard figures.
//!
//! ## Usage
//! ```bash
//! # Seed the configured database (AGRO_DATABASE_PATH or the platform data dir)
//! cargo run -p agro-store --bin seed
//!
//! # Specify database path
//! cargo run -p agro-store --bin seed -- --db ./data/agro.db
//!
//! # Use a config file (database path, limits, FUNRURAL rate)
//! cargo run -p agro-store --bin seed -- --config ./config.toml
//! ```
//!
//! `--db` wins over the config file and environment.
//!
//! ## Generated Data
//! - Farms, one of them inactive
//! - Seasons (soy, corn, wheat) entered through the season form
//! - Fields (talhões) with their latest margin
//! - Clients, one individual (CPF) and one company (CNPJ)
//! - A January cash-flow ledger with realized and projected entries

use chrono::{DateTime, TimeZone, Utc};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use agro_core::budget::{FarmOverview, FieldPortfolio, SeasonSummary};
use agro_core::calculations::funrural;
use agro_core::cash_flow::{entries_in_window, CashFlowProjection, CashFlowWindow};
use agro_core::format::{format_brl, format_decimal_br, format_document};
use agro_core::forms::{ClientForm, FieldForm, SeasonForm};
use agro_core::types::{
    new_id, CashFlowEntry, Client, Farm, Field, FieldStatus, FlowDirection, FlowStatus, Season,
    SeasonStatus,
};
use agro_core::{Money, ValidationLimits};
use agro_store::{AppConfig, CollectionRepository, Store};

/// `(name, location, hectares, active)`
const FARMS: &[(&str, &str, f64, bool)] = &[
    ("Fazenda Santa Rita", "Sorriso - MT", 850.0, true),
    ("Fazenda Boa Vista", "Rio Verde - GO", 1_200.0, true),
    ("Sítio São José", "Castro - PR", 120.0, false),
];

/// Season form inputs, typed the way a user would (pt-BR numbers), plus
/// realized `(cost, revenue, yield)` once the season has moved on.
const SEASONS: &[(&str, &str, &str, &str, &str, &str, SeasonStatus, Option<(f64, f64, f64)>)] = &[
    (
        "Safra Soja 2023/24",
        "Soja",
        "150",
        "300.000,00",
        "450.000,00",
        "9000",
        SeasonStatus::Completed,
        Some((318_500.0, 472_300.0, 9_450.0)),
    ),
    (
        "Safra Soja 2024/25",
        "Soja",
        "160",
        "330.000,00",
        "480.000,00",
        "9600",
        SeasonStatus::Active,
        Some((210_400.0, 0.0, 0.0)),
    ),
    (
        "Safrinha Milho 2025",
        "Milho",
        "120",
        "180.000,00",
        "260.000,00",
        "14400",
        SeasonStatus::Planning,
        None,
    ),
    (
        "Trigo Inverno 2025",
        "Trigo",
        "",
        "",
        "",
        "",
        SeasonStatus::Planning,
        None,
    ),
];

/// `(name, area, crop, status, gross margin, roi %)`
const FIELDS: &[(&str, &str, &str, FieldStatus, f64, f64)] = &[
    ("Talhão 1 - Sede", "45", "Soja", FieldStatus::Active, 67_500.0, 18.5),
    ("Talhão 2 - Baixada", "38,5", "Milho", FieldStatus::Active, 42_350.0, 14.2),
    ("Talhão 3 - Encosta", "52", "", FieldStatus::Planning, 0.0, 0.0),
    ("Talhão 4 - Reserva", "12", "Pastagem", FieldStatus::Inactive, -3_600.0, -6.0),
];

/// `(name, document, email, phone)`
const CLIENTS: &[(&str, &str, &str, &str)] = &[
    ("João da Silva", "529.982.247-25", "joao@fazenda.com.br", "(11) 98765-4321"),
    ("Cooperativa Agro Vale", "11.222.333/0001-81", "compras@agrovale.coop.br", ""),
];

/// `(day of Jan 2025, description, direction, reais, status, category)`
const LEDGER: &[(u32, &str, FlowDirection, i64, FlowStatus, &str)] = &[
    (16, "Venda de soja - lote 1", FlowDirection::Inflow, 180_000, FlowStatus::Realized, "Vendas"),
    (17, "Fertilizantes", FlowDirection::Outflow, 15_000, FlowStatus::Realized, "Insumos"),
    (20, "Diesel", FlowDirection::Outflow, 8_500, FlowStatus::Realized, "Combustível"),
    (23, "Venda de soja - lote 2", FlowDirection::Inflow, 95_000, FlowStatus::Projected, "Vendas"),
    (25, "Folha de pagamento", FlowDirection::Outflow, 32_000, FlowStatus::Projected, "Pessoal"),
    (28, "Parcela do trator", FlowDirection::Outflow, 12_400, FlowStatus::Projected, "Financiamento"),
];

const OPENING_BALANCE_REAIS: f64 = 250_000.0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Agro Finance Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: from config,");
                println!("                         AGRO_DATABASE_PATH, or the platform data dir)");
                println!("  -c, --config <PATH>    Config file (database, limits, FUNRURAL rate)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = AppConfig::load(config_path)?;
    config.override_database_path(db_path);

    println!("🌱 Agro Finance Seed Data Generator");
    println!("===================================");
    println!("Database: {}", config.store.resolved_database_path().display());
    println!();

    let store = Store::new(config.store_config()).await?;
    info!("Store ready");

    let seasons_repo = store.repository::<Season>();
    let existing = seasons_repo.count().await?;
    if existing > 0 {
        println!("⚠ Store already has {} seasons", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        store.close().await;
        return Ok(());
    }

    let seasons = build_seasons(&config.limits)?;
    let fields = build_fields(&config.limits)?;
    let clients = CLIENTS
        .iter()
        .map(|(name, document, email, phone)| {
            ClientForm {
                name: name.to_string(),
                document: document.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            }
            .into_client()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let ledger = build_ledger();
    let farms: Vec<Farm> = FARMS
        .iter()
        .map(|(name, location, size, active)| Farm {
            id: new_id(),
            name: name.to_string(),
            location: location.to_string(),
            size: *size,
            active: *active,
        })
        .collect();

    store.repository::<Farm>().save(&farms).await?;
    seasons_repo.save(&seasons).await?;
    store.repository::<Field>().save(&fields).await?;
    store.repository::<Client>().save(&clients).await?;
    store.repository::<CashFlowEntry>().save(&ledger).await?;

    println!("✓ Saved collections: {}", store.entity_types().await?.join(", "));

    // Reload from the store so the report reflects what was persisted
    let seasons = seasons_repo.load().await?;
    let fields = store.repository::<Field>().load().await?;
    let ledger = store.repository::<CashFlowEntry>().load().await?;

    print_farms(&store.repository::<Farm>().load().await?);
    print_seasons(&seasons, config.taxes.funrural_rate);
    print_fields(&fields);
    print_clients(&clients);
    print_cash_flow(&ledger);

    println!();
    println!("✓ Seed complete!");

    store.close().await;
    Ok(())
}

fn build_seasons(limits: &ValidationLimits) -> Result<Vec<Season>, Box<dyn std::error::Error>> {
    let mut seasons = Vec::with_capacity(SEASONS.len());

    for (name, crop, area, cost, revenue, expected, status, realized) in SEASONS {
        let form = SeasonForm {
            name: name.to_string(),
            crop: crop.to_string(),
            area: area.to_string(),
            budgeted_cost: cost.to_string(),
            budgeted_revenue: revenue.to_string(),
            expected_yield: expected.to_string(),
            status: *status,
        };

        let mut season = form.into_season(limits)?;
        if let Some((actual_cost, actual_revenue, actual_yield)) = realized {
            season.actual_cost = Money::from_reais(*actual_cost);
            season.actual_revenue = Money::from_reais(*actual_revenue);
            season.actual_yield = *actual_yield;
        }
        seasons.push(season);
    }

    Ok(seasons)
}

fn build_fields(limits: &ValidationLimits) -> Result<Vec<Field>, Box<dyn std::error::Error>> {
    let mut fields = Vec::with_capacity(FIELDS.len());

    for (name, area, crop, status, margin, roi) in FIELDS {
        let form = FieldForm {
            name: name.to_string(),
            area: area.to_string(),
            crop: crop.to_string(),
            status: *status,
        };

        let mut field = form.into_field(limits)?;
        field.gross_margin = Money::from_reais(*margin);
        field.roi = *roi;
        fields.push(field);
    }

    Ok(fields)
}

fn january(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn build_ledger() -> Vec<CashFlowEntry> {
    LEDGER
        .iter()
        .map(|(day, description, direction, reais, status, category)| CashFlowEntry {
            id: new_id(),
            date: january(*day),
            description: description.to_string(),
            direction: *direction,
            amount: Money::from_centavos(reais * 100),
            status: *status,
            category: category.to_string(),
            operation: "Sede".to_string(),
        })
        .collect()
}

fn print_farms(farms: &[Farm]) {
    let overview = FarmOverview::from_farms(farms);

    println!();
    println!("Farms");
    println!("-----");
    println!(
        "  {} farms ({} active), {} ha",
        overview.farms,
        overview.active,
        format_decimal_br(overview.total_area, 1)
    );
}

fn print_seasons(seasons: &[Season], funrural_rate: f64) {
    println!();
    println!("Seasons");
    println!("-------");

    for season in seasons {
        let summary = SeasonSummary::from_season(season);
        println!("{} [{}]", season.name, season.status.label());
        println!(
            "  Budget: {} cost / {} revenue",
            format_brl(season.budgeted_cost),
            format_brl(season.budgeted_revenue)
        );
        println!(
            "  Cost variance: {}%{}",
            format_decimal_br(summary.cost_variance, 2),
            if summary.over_budget { " ⚠ over budget" } else { "" }
        );

        if season.actual_revenue.is_positive() {
            let tax = funrural(season.actual_revenue.to_f64(), funrural_rate);
            println!(
                "  Realized margin: {} ({} /ha, ROI {}%)",
                format_brl(Money::from_reais(summary.realized_margin)),
                format_brl(Money::from_reais(summary.margin_per_hectare)),
                format_decimal_br(summary.roi, 2)
            );
            println!(
                "  FUNRURAL ({}%): {}",
                format_decimal_br(funrural_rate, 1),
                format_brl(Money::from_reais(tax))
            );
        }
    }
}

fn print_fields(fields: &[Field]) {
    let portfolio = FieldPortfolio::from_fields(fields);

    println!();
    println!("Fields");
    println!("------");
    println!(
        "  {} fields, {} ha ({} active, {} planning, {} inactive)",
        portfolio.count(),
        format_decimal_br(portfolio.total_area, 1),
        portfolio.active,
        portfolio.planning,
        portfolio.inactive
    );
    println!(
        "  Total margin: {} (average {} /ha)",
        format_brl(Money::from_reais(portfolio.total_margin)),
        format_brl(Money::from_reais(portfolio.average_margin_per_hectare))
    );
}

fn print_clients(clients: &[Client]) {
    println!();
    println!("Clients");
    println!("-------");
    for client in clients {
        let document = format_document(&client.document).unwrap_or_else(|| client.document.clone());
        println!("  {} ({}) {}", client.name, client.kind.label(), document);
    }
}

fn print_cash_flow(ledger: &[CashFlowEntry]) {
    let entries = entries_in_window(ledger, january(15), CashFlowWindow::Month);
    let projection =
        CashFlowProjection::project(Money::from_reais(OPENING_BALANCE_REAIS), &entries);

    println!();
    println!("Cash flow (30 days from 15/01/2025)");
    println!("-----------------------------------");
    println!("  Current balance:    {}", format_brl(projection.current_balance));
    println!("  Realized in/out:    {} / {}", format_brl(projection.realized_inflows), format_brl(projection.realized_outflows));
    println!("  Projected in/out:   {} / {}", format_brl(projection.projected_inflows), format_brl(projection.projected_outflows));
    println!(
        "  Projected balance:  {}{}",
        format_brl(projection.projected_balance),
        if projection.is_improving() { " ↑" } else { " ↓" }
    );
}
