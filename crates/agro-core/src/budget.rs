//! # Season, Field & Farm Summaries
//!
//! Budget-versus-actual figures for the season cards, plus the portfolio
//! headers of the fields and farms screens.
//!
//! ## Season Card
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Safra Soja 2024/25                               [Em andamento]        │
//! │                                                                         │
//! │  Orçado      R$ 450.000,00      Realizado   R$ 480.000,00               │
//! │  Variação    +6,7%  ◄── over budget (> 5%)                              │
//! │                                                                         │
//! │  cost_variance    = budget_variance(actual_cost, budgeted_cost)        │
//! │  revenue_variance = variation(actual_revenue, budgeted_revenue)        │
//! │  yield_variance   = variation(actual_yield, expected_yield)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A season that has not spent anything yet shows a 0% variance, not -100%.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculations::{
    gross_margin, margin_per_hectare, roi, round_to_two_decimals, variation,
};
use crate::types::{Farm, Field, FieldStatus, Season};

/// Cost overrun (in percent) above which a season is flagged.
pub const OVER_BUDGET_THRESHOLD: f64 = 5.0;

/// Percentage by which `actual_cost` deviates from `budgeted_cost`.
///
/// Returns 0 while nothing has been spent (`actual_cost <= 0`) and when
/// there is no budget to compare against.
///
/// ## Example
/// ```rust
/// use agro_core::budget::budget_variance;
///
/// assert_eq!(budget_variance(480_000.0, 400_000.0), 20.0);
/// assert_eq!(budget_variance(0.0, 400_000.0), 0.0);
/// ```
pub fn budget_variance(actual_cost: f64, budgeted_cost: f64) -> f64 {
    if actual_cost <= 0.0 || budgeted_cost == 0.0 {
        return 0.0;
    }
    ((actual_cost - budgeted_cost) / budgeted_cost) * 100.0
}

/// True when the cost variance exceeds [`OVER_BUDGET_THRESHOLD`].
pub fn is_over_budget(variance: f64) -> bool {
    variance > OVER_BUDGET_THRESHOLD
}

// =============================================================================
// Season Summary
// =============================================================================

/// Derived figures for one season. Percentages are rounded to 2 decimals;
/// monetary values stay as raw reais.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub cost_variance: f64,
    pub revenue_variance: f64,
    pub yield_variance: f64,
    /// `actual_revenue - actual_cost`.
    pub realized_margin: f64,
    pub margin_per_hectare: f64,
    /// Realized margin over actual cost, in percent.
    pub roi: f64,
    pub over_budget: bool,
}

impl SeasonSummary {
    pub fn from_season(season: &Season) -> Self {
        let actual_cost = season.actual_cost.to_f64();
        let actual_revenue = season.actual_revenue.to_f64();

        let cost_variance = budget_variance(actual_cost, season.budgeted_cost.to_f64());
        let realized_margin = gross_margin(actual_revenue, actual_cost);

        SeasonSummary {
            cost_variance: round_to_two_decimals(cost_variance),
            revenue_variance: round_to_two_decimals(variation(
                actual_revenue,
                season.budgeted_revenue.to_f64(),
            )),
            yield_variance: round_to_two_decimals(variation(
                season.actual_yield,
                season.expected_yield,
            )),
            realized_margin,
            margin_per_hectare: margin_per_hectare(realized_margin, season.area),
            roi: round_to_two_decimals(roi(realized_margin, actual_cost)),
            over_budget: is_over_budget(cost_variance),
        }
    }
}

// =============================================================================
// Field Portfolio
// =============================================================================

/// Aggregates shown above the field list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldPortfolio {
    /// Hectares across all fields.
    pub total_area: f64,
    /// Sum of field gross margins, in reais.
    pub total_margin: f64,
    /// `total_margin / total_area`; 0 when the area is 0.
    pub average_margin_per_hectare: f64,
    pub active: usize,
    pub planning: usize,
    pub inactive: usize,
}

impl FieldPortfolio {
    pub fn from_fields(fields: &[Field]) -> Self {
        let mut portfolio = FieldPortfolio::default();

        for field in fields {
            portfolio.total_area += field.area;
            portfolio.total_margin += field.gross_margin.to_f64();
            match field.status {
                FieldStatus::Active => portfolio.active += 1,
                FieldStatus::Planning => portfolio.planning += 1,
                FieldStatus::Inactive => portfolio.inactive += 1,
            }
        }

        portfolio.average_margin_per_hectare =
            margin_per_hectare(portfolio.total_margin, portfolio.total_area);
        portfolio
    }

    /// Number of fields summarized.
    pub fn count(&self) -> usize {
        self.active + self.planning + self.inactive
    }
}

// =============================================================================
// Farm Overview
// =============================================================================

/// Header of the farms screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FarmOverview {
    /// Hectares across every registered farm, active or not.
    pub total_area: f64,
    pub farms: usize,
    pub active: usize,
}

impl FarmOverview {
    pub fn from_farms(farms: &[Farm]) -> Self {
        FarmOverview {
            total_area: farms.iter().map(|f| f.size).sum(),
            farms: farms.len(),
            active: farms.iter().filter(|f| f.active).count(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
