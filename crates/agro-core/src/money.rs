//! # Money Module
//!
//! Provides the `Money` type for amounts that leave the calculation engine.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Formulas in calculations.rs work in f64 reais (ratios, PMT, powers    │
//! │  are not integer-friendly). Once a value is stored on an entity or     │
//! │  shown to the user it becomes Money: integer centavos.                 │
//! │                                                                         │
//! │    calculations::pmt(...)  ──►  Money::from_reais(888.4878...)         │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                                 Money(88849)  ──►  "R$ 888,49"         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agro_core::money::Money;
//!
//! let sack_price = Money::from_centavos(12_050); // R$ 120,50
//! let total = sack_price * 3;
//! assert_eq!(total.centavos(), 36_150);
//!
//! let from_formula = Money::from_reais(888.4878867834168);
//! assert_eq!(from_formula.centavos(), 88_849);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are losses and outflows
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as a bare integer** so stored collections stay compact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use agro_core::money::Money;
    ///
    /// let price = Money::from_centavos(1099); // R$ 10,99
    /// assert_eq!(price.centavos(), 1099);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Converts an `f64` amount in reais, rounding half up to the centavo.
    ///
    /// Non-finite input saturates (`NaN` becomes zero), so validate with
    /// [`validate_currency`](crate::validation::validate_currency) first when the
    /// value comes from the user.
    pub fn from_reais(reais: f64) -> Self {
        Money((reais * 100.0 + 0.5).floor() as i64)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use agro_core::money::Money;
    ///
    /// assert_eq!(Money::from_centavos(1099).reais(), 10);
    /// assert_eq!(Money::from_centavos(-550).reais(), -5);
    /// ```
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Converts back into an `f64` amount for the calculation engine.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a percentage rate (e.g. a tax withholding) in integer math.
    ///
    /// ## Implementation
    /// The rate is converted to basis points (`2.3%` → `230`), then:
    /// `(centavos * bps + 5000) / 10000`. The +5000 rounds half up for
    /// non-negative amounts.
    ///
    /// ## Example
    /// ```rust
    /// use agro_core::money::Money;
    ///
    /// let gross = Money::from_centavos(10_000_000); // R$ 100.000,00
    /// let funrural = gross.percentage(2.3);
    /// assert_eq!(funrural.centavos(), 230_000);     // R$ 2.300,00
    /// ```
    pub fn percentage(&self, rate: f64) -> Money {
        // Use i128 to prevent overflow on large amounts
        let bps = (rate * 100.0).round() as i128;
        let centavos = (self.0 as i128 * bps + 5000) / 10000;
        Money(centavos as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style display (`R$ 1234.56`).
///
/// ## Note
/// Use [`format_brl`](crate::format::format_brl) for pt-BR screen output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {}.{:02}",
            sign,
            self.reais().abs(),
            self.centavos_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Parses pt-BR input the way [`parse_brl`](crate::format::parse_brl) does.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        crate::format::parse_brl(s).ok_or_else(|| CoreError::InvalidAmount(s.to_string()))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a whole quantity (sacks, bags, units).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
