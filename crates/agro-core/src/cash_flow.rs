//! # Cash-Flow Projection
//!
//! Projects the farm's balance from the ledger of projected and realized
//! entries.
//!
//! ```text
//!   current balance ──┐
//!                     ├──►  projected balance = current + Σ in − Σ out
//!   projected in  ────┤        (Projected entries only.
//!   projected out ────┘         Realized ones are already in the balance)
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CashFlowEntry, FlowDirection, FlowStatus};

/// Period filters of the cash-flow screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowWindow {
    Week,
    #[default]
    Month,
}

impl CashFlowWindow {
    pub const fn days(&self) -> i64 {
        match self {
            CashFlowWindow::Week => 7,
            CashFlowWindow::Month => 30,
        }
    }
}

/// Totals for the cash-flow header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowProjection {
    pub current_balance: Money,
    pub projected_inflows: Money,
    pub projected_outflows: Money,
    pub projected_balance: Money,
    pub realized_inflows: Money,
    pub realized_outflows: Money,
}

impl CashFlowProjection {
    /// Projects `current_balance` forward over `entries`.
    ///
    /// ## Example
    /// ```rust
    /// use agro_core::cash_flow::CashFlowProjection;
    /// use agro_core::money::Money;
    ///
    /// let projection = CashFlowProjection::project(Money::from_centavos(100_000), &[]);
    /// assert_eq!(projection.projected_balance, Money::from_centavos(100_000));
    /// assert!(!projection.is_improving());
    /// ```
    pub fn project(current_balance: Money, entries: &[CashFlowEntry]) -> Self {
        let mut projection = CashFlowProjection {
            current_balance,
            ..Default::default()
        };

        for entry in entries {
            let bucket = match (entry.status, entry.direction) {
                (FlowStatus::Projected, FlowDirection::Inflow) => &mut projection.projected_inflows,
                (FlowStatus::Projected, FlowDirection::Outflow) => &mut projection.projected_outflows,
                (FlowStatus::Realized, FlowDirection::Inflow) => &mut projection.realized_inflows,
                (FlowStatus::Realized, FlowDirection::Outflow) => &mut projection.realized_outflows,
            };
            *bucket += entry.amount;
        }

        projection.projected_balance =
            current_balance + projection.projected_inflows - projection.projected_outflows;
        projection
    }

    /// Net of projected entries (`in - out`).
    pub fn projected_net(&self) -> Money {
        self.projected_inflows - self.projected_outflows
    }

    /// True if the projected balance ends above the current one.
    pub fn is_improving(&self) -> bool {
        self.projected_balance > self.current_balance
    }
}

/// Entries dated in `[from, from + days)`, ordered by date.
///
/// A window reaching past the representable date range is open-ended.
pub fn entries_within(entries: &[CashFlowEntry], from: DateTime<Utc>, days: i64) -> Vec<CashFlowEntry> {
    let until = TimeDelta::try_days(days)
        .and_then(|span| from.checked_add_signed(span))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
    let mut selected: Vec<CashFlowEntry> = entries
        .iter()
        .filter(|e| e.date >= from && e.date < until)
        .cloned()
        .collect();
    selected.sort_by_key(|e| e.date);
    selected
}

/// [`entries_within`] for one of the screen's period filters.
pub fn entries_in_window(
    entries: &[CashFlowEntry],
    from: DateTime<Utc>,
    window: CashFlowWindow,
) -> Vec<CashFlowEntry> {
    entries_within(entries, from, window.days())
}

// =============================================================================
// Unit Tests
// =============================================================================
