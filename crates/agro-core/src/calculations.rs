//! # Calculation Engine
//!
//! Deterministic financial arithmetic used by the reporting screens.
//!
//! ## Division-by-Zero Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EVERY ratio below has a defined answer for a zero denominator          │
//! │                                                                         │
//! │    margin_percentage(0, cost)      → 0                                  │
//! │    cost_per_hectare(cost, 0)       → 0                                  │
//! │    roi(profit, 0)                  → 0                                  │
//! │    break_even(fixed, 30, 30)       → ∞   (never reaches break-even)     │
//! │    variation(100, 0)               → 100                                │
//! │    variation(0, 0)                 → 0                                  │
//! │                                                                         │
//! │  Screens render these sentinels directly. Do not replace them with      │
//! │  Option/Result: the dashboard has no "missing value" state.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Units
//! - Monetary values are plain `f64` reais. Round with
//!   [`round_to_two_decimals`] (or convert to [`Money`](crate::money::Money))
//!   only at the output boundary.
//! - Rates are percentages as plain numbers: `12.0` means 12%.
//!
//! ## Usage
//! ```rust
//! use agro_core::calculations::{gross_margin, margin_percentage, round_to_two_decimals};
//!
//! let margin = gross_margin(100_000.0, 60_000.0);
//! assert_eq!(margin, 40_000.0);
//! assert_eq!(margin_percentage(100_000.0, 60_000.0), 40.0);
//! assert_eq!(round_to_two_decimals(1.235), 1.24);
//! ```

use chrono::{DateTime, Utc};

use crate::types::{Batch, Valued};

/// Default FUNRURAL withholding rate (2.3% of gross revenue).
pub const DEFAULT_FUNRURAL_RATE: f64 = 2.3;

const MS_PER_DAY: f64 = 86_400_000.0;

// =============================================================================
// Margins & Returns
// =============================================================================

/// Gross margin: `revenue - cost`. Negative when the operation loses money.
#[inline]
pub fn gross_margin(revenue: f64, cost: f64) -> f64 {
    revenue - cost
}

/// Margin as a percentage of revenue.
///
/// Returns 0 when `revenue` is 0.
///
/// ## Example
/// ```rust
/// use agro_core::calculations::margin_percentage;
///
/// assert_eq!(margin_percentage(100_000.0, 80_000.0), 20.0);
/// assert_eq!(margin_percentage(0.0, 1_000.0), 0.0);
/// ```
pub fn margin_percentage(revenue: f64, cost: f64) -> f64 {
    if revenue == 0.0 {
        return 0.0;
    }
    ((revenue - cost) / revenue) * 100.0
}

/// Margin per hectare. Returns 0 when `area` is 0.
pub fn margin_per_hectare(total_margin: f64, area: f64) -> f64 {
    if area == 0.0 {
        return 0.0;
    }
    total_margin / area
}

/// Cost per hectare. Returns 0 when `area` is 0.
pub fn cost_per_hectare(total_cost: f64, area: f64) -> f64 {
    if area == 0.0 {
        return 0.0;
    }
    total_cost / area
}

/// Return on investment, as a percentage. Returns 0 when `investment` is 0.
pub fn roi(profit: f64, investment: f64) -> f64 {
    if investment == 0.0 {
        return 0.0;
    }
    (profit / investment) * 100.0
}

/// Break-even point in units sold.
///
/// ## Formula
/// ```text
///              fixed_cost
/// units = ──────────────────────
///          price - variable_cost
/// ```
///
/// When the contribution margin (`price - variable_cost`) is zero or
/// negative, no amount of sales covers the fixed cost and the result is
/// `f64::INFINITY`.
///
/// ## Example
/// ```rust
/// use agro_core::calculations::break_even;
///
/// assert_eq!(break_even(100_000.0, 50.0, 30.0), 5_000.0);
/// assert!(break_even(100_000.0, 20.0, 30.0).is_infinite());
/// ```
pub fn break_even(fixed_cost: f64, price: f64, variable_cost: f64) -> f64 {
    let contribution = price - variable_cost;
    if contribution <= 0.0 {
        return f64::INFINITY;
    }
    fixed_cost / contribution
}

/// Production per hectare (e.g. sacks/ha). Returns 0 when `area` is 0.
pub fn yield_per_hectare(production: f64, area: f64) -> f64 {
    if area == 0.0 {
        return 0.0;
    }
    production / area
}

/// Percentage variation from `previous` to `current`.
///
/// With `previous == 0` the result is 100 if anything changed and 0 if
/// both values are zero. The dashboard's trend arrows depend on exactly
/// these two values.
pub fn variation(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current != 0.0 { 100.0 } else { 0.0 };
    }
    ((current - previous) / previous) * 100.0
}

// =============================================================================
// Series & Aggregates
// =============================================================================

/// Simple moving average over a window of `window` consecutive values.
///
/// The output has `values.len() - window + 1` elements in source order.
/// Returns an empty vector when the window is larger than the series
/// (or zero).
///
/// ## Example
/// ```rust
/// use agro_core::calculations::moving_average;
///
/// assert_eq!(moving_average(&[10.0, 20.0, 30.0, 40.0, 50.0], 3), vec![20.0, 30.0, 40.0]);
/// assert!(moving_average(&[10.0, 20.0], 5).is_empty());
/// ```
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }

    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Sums the `value` of every record. Returns 0 for an empty slice.
pub fn total<T: Valued>(records: &[T]) -> f64 {
    records.iter().map(Valued::value).sum()
}

/// Arithmetic mean. Returns 0 for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// =============================================================================
// Interest & Financing
// =============================================================================

/// Total accumulated value under compound interest:
/// `principal * (1 + rate/100)^periods`.
///
/// Note this is the final amount, not just the interest portion.
pub fn compound_interest(principal: f64, rate: f64, periods: u32) -> f64 {
    principal * (1.0 + rate / 100.0).powf(f64::from(periods))
}

/// Fixed monthly installment for an amortizing loan (Price table / PMT).
///
/// ## Formula
/// ```text
///   i   = annual_rate / 100 / 12
///
///                  i × (1 + i)ⁿ
///   PMT = P × ─────────────────
///               (1 + i)ⁿ - 1
/// ```
///
/// With a zero rate the loan is split evenly across installments.
/// Zero installments yields 0.
///
/// ## Example
/// ```rust
/// use agro_core::calculations::{pmt, round_to_two_decimals};
///
/// assert_eq!(round_to_two_decimals(pmt(10_000.0, 12.0, 12)), 888.49);
/// assert_eq!(pmt(12_000.0, 0.0, 12), 1_000.0);
/// ```
pub fn pmt(principal: f64, annual_rate: f64, installments: u32) -> f64 {
    if installments == 0 {
        return 0.0;
    }
    if annual_rate == 0.0 {
        return principal / installments as f64;
    }

    let monthly_rate = annual_rate / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powf(f64::from(installments));
    if growth.is_infinite() {
        // Very long terms pay interest only
        return principal * monthly_rate;
    }
    (principal * monthly_rate * growth) / (growth - 1.0)
}

// =============================================================================
// Due Dates
// =============================================================================

/// Days from now until `due`. Negative once the due date has passed.
pub fn days_until_due(due: DateTime<Utc>) -> i64 {
    days_until_due_at(due, Utc::now())
}

/// Days from `now` until `due`, rounded up to whole days.
///
/// A bill due later today counts as 1 day away; one due yesterday at the
/// same time is -1. Callers that want calendar-day semantics should
/// normalize both instants to midnight first.
pub fn days_until_due_at(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (due - now).num_milliseconds() as f64;
    (ms / MS_PER_DAY).ceil() as i64
}

/// Whole days the bill is overdue. 0 if it is not yet due.
pub fn days_overdue(due: DateTime<Utc>) -> i64 {
    days_overdue_at(due, Utc::now())
}

/// [`days_overdue`] against an explicit `now`.
pub fn days_overdue_at(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (now - due).num_milliseconds() as f64;
    ((ms / MS_PER_DAY).floor() as i64).max(0)
}

// =============================================================================
// Taxes
// =============================================================================

/// FUNRURAL withholding: `gross_revenue * rate/100`.
///
/// ## Example
/// ```rust
/// use agro_core::calculations::funrural;
///
/// assert_eq!(funrural(100_000.0, 1.5), 1_500.0);
/// ```
pub fn funrural(gross_revenue: f64, rate: f64) -> f64 {
    gross_revenue * (rate / 100.0)
}

/// FUNRURAL at the [`DEFAULT_FUNRURAL_RATE`].
pub fn funrural_default(gross_revenue: f64) -> f64 {
    funrural(gross_revenue, DEFAULT_FUNRURAL_RATE)
}

// =============================================================================
// Inventory
// =============================================================================

/// Average inventory level between two stock counts.
pub fn average_stock(opening_stock: f64, closing_stock: f64) -> f64 {
    (opening_stock + closing_stock) / 2.0
}

/// Inventory turnover (times per period). Returns 0 when the average stock is 0.
pub fn stock_turnover(cost_of_goods_sold: f64, average_stock: f64) -> f64 {
    if average_stock == 0.0 {
        return 0.0;
    }
    cost_of_goods_sold / average_stock
}

/// Weighted-average unit cost across purchase batches.
///
/// ```text
///   Σ (quantity × unit_cost)
///   ────────────────────────
///        Σ quantity
/// ```
///
/// Returns 0 for no batches, or when every batch is empty.
pub fn weighted_average_cost(batches: &[Batch]) -> f64 {
    let quantity: f64 = batches.iter().map(|b| b.quantity).sum();
    if batches.is_empty() || quantity == 0.0 {
        return 0.0;
    }

    let value: f64 = batches.iter().map(Batch::total_cost).sum();
    value / quantity
}

// =============================================================================
// Assets
// =============================================================================

/// Annual straight-line depreciation. Returns 0 when `useful_life_years` is 0.
pub fn linear_depreciation(acquisition_cost: f64, residual_value: f64, useful_life_years: f64) -> f64 {
    if useful_life_years == 0.0 {
        return 0.0;
    }
    (acquisition_cost - residual_value) / useful_life_years
}

// =============================================================================
// Rounding
// =============================================================================

/// Magnitude (in centavos) from which `f64` spacing is too coarse for
/// cent rounding to be stable. Values that large are returned as is.
const MAX_ROUNDABLE_CENTS: f64 = 281_474_976_710_656.0; // 2^48

/// Rounds to 2 decimal places, half up (toward +∞ on ties).
///
/// Non-finite input is returned unchanged, and so is anything of
/// 2^48 centavos (about 2.8 trillion) or more.
///
/// ## Example
/// ```rust
/// use agro_core::calculations::round_to_two_decimals;
///
/// assert_eq!(round_to_two_decimals(1.234), 1.23);
/// assert_eq!(round_to_two_decimals(1.235), 1.24);
/// assert_eq!(round_to_two_decimals(1.2), 1.2);
/// ```
pub fn round_to_two_decimals(value: f64) -> f64 {
    let cents = value * 100.0;
    if !cents.is_finite() || cents.abs() >= MAX_ROUNDABLE_CENTS {
        return value;
    }
    (cents + 0.5).floor() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
