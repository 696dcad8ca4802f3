//! # Domain Types
//!
//! Core domain types shared by the calculation engine, the forms and the store.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Season       │   │     Field       │   │    Client       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  crop, area     │   │  area, crop     │   │  kind           │       │
//! │  │  budget/actual  │   │  gross_margin   │   │  document       │       │
//! │  │  SeasonStatus   │   │  FieldStatus    │   │  email, phone   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PurchaseOrder   │   │    Expense      │   │ CashFlowEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  supplier       │   │  category       │   │  FlowDirection  │       │
//! │  │  total          │   │  amount, due    │   │  FlowStatus     │       │
//! │  │  POStatus       │   │  approved, paid │   │  amount, date   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │     Farm        │                                                   │
//! │  │  ─────────────  │                                                   │
//! │  │  location, size │                                                   │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Calculation inputs: Batch, ValueRecord, and the Valued trait          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries `id`: a UUID v4 string generated on the device, so
//! records created offline never collide.
//!
//! ## Status Enums
//! Closed sets. Stored lowercase (`"planning"`), displayed in pt-BR via
//! `label()`. Parsing an unknown string fails with
//! [`CoreError::UnknownStatus`] instead of falling through to a default.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::format::only_digits;
use crate::money::Money;

/// Generates a new entity id (UUID v4).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Calculation Inputs
// =============================================================================

/// Anything with a monetary `value` that can be totalled.
pub trait Valued {
    fn value(&self) -> f64;
}

/// A bare `{ value }` record, as the dashboard aggregates pass it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValueRecord {
    pub value: f64,
}

impl Valued for ValueRecord {
    fn value(&self) -> f64 {
        self.value
    }
}

/// One purchase lot of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Units bought (>= 0).
    pub quantity: f64,
    /// Cost per unit in reais (>= 0).
    pub unit_cost: f64,
}

impl Batch {
    #[inline]
    pub const fn new(quantity: f64, unit_cost: f64) -> Self {
        Batch {
            quantity,
            unit_cost,
        }
    }

    /// `quantity × unit_cost`.
    #[inline]
    pub fn total_cost(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

// =============================================================================
// Status Enums
// =============================================================================

/// Lifecycle of a crop season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    /// Budget being drafted, nothing planted.
    #[default]
    Planning,
    /// Planted and accruing costs.
    Active,
    /// Harvested and closed.
    Completed,
    /// Abandoned before completion.
    Cancelled,
}

impl SeasonStatus {
    pub const ALL: [SeasonStatus; 4] = [
        SeasonStatus::Planning,
        SeasonStatus::Active,
        SeasonStatus::Completed,
        SeasonStatus::Cancelled,
    ];

    /// Stored representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SeasonStatus::Planning => "planning",
            SeasonStatus::Active => "active",
            SeasonStatus::Completed => "completed",
            SeasonStatus::Cancelled => "cancelled",
        }
    }

    /// pt-BR label shown on the season cards.
    pub const fn label(&self) -> &'static str {
        match self {
            SeasonStatus::Planning => "Planejamento",
            SeasonStatus::Active => "Em andamento",
            SeasonStatus::Completed => "Concluída",
            SeasonStatus::Cancelled => "Cancelada",
        }
    }
}

/// Production state of a field (talhão).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Active,
    #[default]
    Planning,
    Inactive,
}

impl FieldStatus {
    pub const ALL: [FieldStatus; 3] = [
        FieldStatus::Active,
        FieldStatus::Planning,
        FieldStatus::Inactive,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldStatus::Active => "active",
            FieldStatus::Planning => "planning",
            FieldStatus::Inactive => "inactive",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            FieldStatus::Active => "Em produção",
            FieldStatus::Planning => "Planejamento",
            FieldStatus::Inactive => "Inativo",
        }
    }
}

/// Purchase order workflow.
///
/// ```text
/// Draft ──► Sent ──► Confirmed ──► Received
///   │         │          │
///   └─────────┴──────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Sent,
    Confirmed,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub const ALL: [PurchaseOrderStatus; 5] = [
        PurchaseOrderStatus::Draft,
        PurchaseOrderStatus::Sent,
        PurchaseOrderStatus::Confirmed,
        PurchaseOrderStatus::Received,
        PurchaseOrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "draft",
            PurchaseOrderStatus::Sent => "sent",
            PurchaseOrderStatus::Confirmed => "confirmed",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "Rascunho",
            PurchaseOrderStatus::Sent => "Enviado",
            PurchaseOrderStatus::Confirmed => "Confirmado",
            PurchaseOrderStatus::Received => "Recebido",
            PurchaseOrderStatus::Cancelled => "Cancelado",
        }
    }

    /// Sent to the supplier but not yet received.
    pub const fn is_pending(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Sent | PurchaseOrderStatus::Confirmed
        )
    }
}

/// Money entering or leaving the farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FlowDirection {
    #[serde(rename = "in")]
    Inflow,
    #[serde(rename = "out")]
    Outflow,
}

impl FlowDirection {
    pub const ALL: [FlowDirection; 2] = [FlowDirection::Inflow, FlowDirection::Outflow];

    pub const fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::Inflow => "in",
            FlowDirection::Outflow => "out",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            FlowDirection::Inflow => "Entrada",
            FlowDirection::Outflow => "Saída",
        }
    }
}

/// Whether a cash-flow entry already happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    #[default]
    Projected,
    Realized,
}

impl FlowStatus {
    pub const ALL: [FlowStatus; 2] = [FlowStatus::Projected, FlowStatus::Realized];

    pub const fn as_str(&self) -> &'static str {
        match self {
            FlowStatus::Projected => "projected",
            FlowStatus::Realized => "realized",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            FlowStatus::Projected => "Previsto",
            FlowStatus::Realized => "Realizado",
        }
    }
}

/// Individual (CPF) or company (CNPJ) client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientKind {
    #[serde(rename = "physical")]
    Individual,
    #[serde(rename = "legal")]
    Company,
}

impl ClientKind {
    pub const ALL: [ClientKind; 2] = [ClientKind::Individual, ClientKind::Company];

    /// Infers the kind from the document's digit count.
    pub fn from_document(document: &str) -> Option<Self> {
        match only_digits(document).len() {
            11 => Some(ClientKind::Individual),
            14 => Some(ClientKind::Company),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ClientKind::Individual => "physical",
            ClientKind::Company => "legal",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            ClientKind::Individual => "Pessoa Física",
            ClientKind::Company => "Pessoa Jurídica",
        }
    }
}

/// Display and FromStr for the status enums, both using `as_str()`.
macro_rules! impl_status_str {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = CoreError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let s = s.trim();
                    $ty::ALL
                        .into_iter()
                        .find(|v| v.as_str().eq_ignore_ascii_case(s))
                        .ok_or_else(|| CoreError::UnknownStatus {
                            kind: $kind,
                            value: s.to_string(),
                        })
                }
            }
        )*
    };
}

impl_status_str!(
    SeasonStatus => "season",
    FieldStatus => "field",
    PurchaseOrderStatus => "purchase order",
    FlowDirection => "flow direction",
    FlowStatus => "flow",
    ClientKind => "client kind",
);

// =============================================================================
// Season
// =============================================================================

/// A crop season with its budget and realized figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, e.g. "Safra Soja 2024/25".
    pub name: String,

    /// Crop planted, e.g. "Soja".
    pub crop: String,

    pub status: SeasonStatus,

    /// Planted area in hectares.
    pub area: f64,

    pub budgeted_cost: Money,
    pub actual_cost: Money,
    pub budgeted_revenue: Money,
    pub actual_revenue: Money,

    /// Expected production (sacks).
    pub expected_yield: f64,
    /// Harvested production (sacks). 0 until harvest.
    pub actual_yield: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Field
// =============================================================================

/// A field (talhão) and its latest economic result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,

    /// Area in hectares.
    pub area: f64,

    /// Current crop, or "Não definida".
    pub crop: String,

    pub status: FieldStatus,

    /// Gross margin of the last closed season on this field.
    pub gross_margin: Money,

    /// ROI of the last closed season (percentage).
    pub roi: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Field {
    /// Gross margin per hectare, in reais.
    pub fn margin_per_hectare(&self) -> f64 {
        crate::calculations::margin_per_hectare(self.gross_margin.to_f64(), self.area)
    }
}

// =============================================================================
// Farm
// =============================================================================

/// A rural property run by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    pub id: String,
    pub name: String,

    /// Municipality and state, e.g. "Sorriso - MT".
    pub location: String,

    /// Total area in hectares.
    pub size: f64,

    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

// =============================================================================
// Client
// =============================================================================

/// A buyer of the farm's production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,

    /// Serialized as `"type"` to match the stored collections.
    #[serde(rename = "type")]
    pub kind: ClientKind,

    /// CPF or CNPJ, digits only.
    pub document: String,

    pub email: Option<String>,
    pub phone: Option<String>,

    /// Records stored before the flag existed read back as active.
    #[serde(default = "active_by_default")]
    pub active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Purchase Order
// =============================================================================

/// An order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,

    /// Sequential number shown to the supplier, e.g. "PC-0042".
    pub number: String,

    pub supplier: String,

    /// Farm operation (e.g. "Confinamento") the purchase is charged to.
    pub operation_id: Option<String>,

    pub status: PurchaseOrderStatus,

    pub total: Money,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Expected delivery date.
    #[ts(as = "Option<String>")]
    pub expected_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Expense
// =============================================================================

/// An accounts-payable entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub category: String,
    pub supplier: Option<String>,

    /// Season the cost is allocated to, if any.
    pub season_id: Option<String>,

    pub amount: Money,

    /// Issue date of the bill.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    #[ts(as = "String")]
    pub due_date: DateTime<Utc>,

    /// Accounting period the cost belongs to.
    #[ts(as = "String")]
    pub competence: DateTime<Utc>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "Option<String>")]
    pub approved_at: Option<DateTime<Utc>>,

    #[ts(as = "Option<String>")]
    pub paid_at: Option<DateTime<Utc>>,

    pub paid: bool,
}

impl Expense {
    /// Unpaid and past its due date as of `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.paid && crate::calculations::days_overdue_at(self.due_date, now) > 0
    }
}

impl Valued for Expense {
    fn value(&self) -> f64 {
        self.amount.to_f64()
    }
}

// =============================================================================
// Cash Flow Entry
// =============================================================================

/// One line of the cash-flow ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowEntry {
    pub id: String,

    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    pub description: String,

    #[serde(rename = "type")]
    pub direction: FlowDirection,

    pub amount: Money,

    pub status: FlowStatus,

    /// e.g. "Vendas", "Insumos".
    pub category: String,

    /// Farm operation, e.g. "Cana".
    pub operation: String,
}

impl CashFlowEntry {
    /// Amount with sign: positive for inflows, negative for outflows.
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            FlowDirection::Inflow => self.amount,
            FlowDirection::Outflow => -self.amount,
        }
    }
}

impl Valued for CashFlowEntry {
    fn value(&self) -> f64 {
        self.amount.to_f64()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in SeasonStatus::ALL {
            assert_eq!(status.to_string().parse::<SeasonStatus>().unwrap(), status);
        }
        for status in PurchaseOrderStatus::ALL {
            assert_eq!(status.as_str().parse::<PurchaseOrderStatus>().unwrap(), status);
        }
        assert_eq!("IN".parse::<FlowDirection>().unwrap(), FlowDirection::Inflow);
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let err = "all".parse::<PurchaseOrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown purchase order status: 'all'");
    }

    #[test]
    fn test_labels() {
        assert_eq!(SeasonStatus::Active.label(), "Em andamento");
        assert_eq!(SeasonStatus::Completed.label(), "Concluída");
        assert_eq!(FieldStatus::Active.label(), "Em produção");
        assert_eq!(PurchaseOrderStatus::Draft.label(), "Rascunho");
        assert_eq!(ClientKind::Company.label(), "Pessoa Jurídica");
    }

    #[test]
    fn test_pending_purchase_orders() {
        let pending: Vec<_> = PurchaseOrderStatus::ALL
            .into_iter()
            .filter(PurchaseOrderStatus::is_pending)
            .collect();
        assert_eq!(
            pending,
            vec![PurchaseOrderStatus::Sent, PurchaseOrderStatus::Confirmed]
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SeasonStatus::default(), SeasonStatus::Planning);
        assert_eq!(FieldStatus::default(), FieldStatus::Planning);
        assert_eq!(PurchaseOrderStatus::default(), PurchaseOrderStatus::Draft);
        assert_eq!(FlowStatus::default(), FlowStatus::Projected);
    }

    #[test]
    fn test_client_kind_from_document() {
        assert_eq!(
            ClientKind::from_document("529.982.247-25"),
            Some(ClientKind::Individual)
        );
        assert_eq!(
            ClientKind::from_document("11.222.333/0001-81"),
            Some(ClientKind::Company)
        );
        assert_eq!(ClientKind::from_document("123"), None);
    }

    #[test]
    fn test_batch_total_cost() {
        assert_eq!(Batch::new(100.0, 10.0).total_cost(), 1_000.0);
    }

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert_eq!(id.len(), 36);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_ne!(id, new_id());
    }

    #[test]
    fn test_cash_flow_entry_serialization() {
        let entry = CashFlowEntry {
            id: "cf-1".to_string(),
            date: DateTime::parse_from_rfc3339("2025-01-16T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            description: "Venda de Gado - Lote 15".to_string(),
            direction: FlowDirection::Inflow,
            amount: Money::from_centavos(18_000_000),
            status: FlowStatus::Realized,
            category: "Vendas".to_string(),
            operation: "Confinamento".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "in");
        assert_eq!(json["status"], "realized");
        assert_eq!(json["amount"], 18_000_000);
        assert_eq!(json["date"], "2025-01-16T00:00:00Z");

        let back: CashFlowEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.signed_amount().centavos(), 18_000_000);
    }

    #[test]
    fn test_expense_overdue() {
        let now = Utc::now();
        let mut expense = Expense {
            id: new_id(),
            description: "Fertilizante NPK".to_string(),
            category: "Insumos".to_string(),
            supplier: None,
            season_id: None,
            amount: Money::from_centavos(2_800_000),
            date: now - Duration::days(20),
            due_date: now - Duration::days(3),
            competence: now - Duration::days(20),
            created_at: now - Duration::days(20),
            approved_at: None,
            paid_at: None,
            paid: false,
        };
        assert!(expense.is_overdue_at(now));
        assert_eq!(expense.value(), 28_000.0);

        expense.paid = true;
        assert!(!expense.is_overdue_at(now));
    }

    #[test]
    fn test_expense_dates_serialization() {
        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);
        let expense = Expense {
            id: "ap-1".to_string(),
            description: "Diesel S10".to_string(),
            category: "Combustível".to_string(),
            supplier: Some("Posto Rural".to_string()),
            season_id: None,
            amount: Money::from_centavos(450_000),
            date: at("2025-01-05T00:00:00Z"),
            due_date: at("2025-02-05T00:00:00Z"),
            competence: at("2025-01-01T00:00:00Z"),
            created_at: at("2025-01-05T14:20:00Z"),
            approved_at: Some(at("2025-01-06T09:00:00Z")),
            paid_at: None,
            paid: false,
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["date"], "2025-01-05T00:00:00Z");
        assert_eq!(json["dueDate"], "2025-02-05T00:00:00Z");
        assert_eq!(json["competence"], "2025-01-01T00:00:00Z");
        assert_eq!(json["createdAt"], "2025-01-05T14:20:00Z");
        assert_eq!(json["approvedAt"], "2025-01-06T09:00:00Z");
        assert!(json["paidAt"].is_null());

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_client_without_active_flag_reads_as_active() {
        let json = serde_json::json!({
            "id": "c-1",
            "name": "Cooperativa Agro Sul",
            "type": "legal",
            "document": "11222333000181",
            "email": null,
            "phone": null,
            "createdAt": "2025-01-10T00:00:00Z",
        });
        let client: Client = serde_json::from_value(json).unwrap();
        assert!(client.active);

        let mut inactive = client.clone();
        inactive.active = false;
        let json = serde_json::to_value(&inactive).unwrap();
        assert_eq!(json["active"], false);
        assert_eq!(serde_json::from_value::<Client>(json).unwrap(), inactive);
    }
}
