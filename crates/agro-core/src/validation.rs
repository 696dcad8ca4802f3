//! # Validation Module
//!
//! Format and checksum validators for the farm-finance forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen input                                                 │
//! │  └── Raw strings as typed by the user                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (boolean checks)                                 │
//! │  ├── Documents: CPF / CNPJ check digits                                │
//! │  ├── Contact:   email, phone                                           │
//! │  ├── Values:    currency, area, stock, dates                           │
//! │  └── Generic:   required, min/max length, range                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: forms.rs                                                      │
//! │  └── Composes these checks into typed ValidationError per field        │
//! │                                                                         │
//! │  Every check answers true/false. None of them panic or return errors.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agro_core::validation::{validate_cpf, validate_email, validate_required};
//!
//! assert!(validate_cpf("529.982.247-25"));
//! assert!(!validate_email("email@"));
//! assert!(!validate_required("   "));
//! ```

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::format::only_digits;
use crate::limits::ValidationLimits;

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;
const NFE_KEY_LEN: usize = 44;

const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

// =============================================================================
// Compiled Patterns
// =============================================================================

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.][^\s@]*\.[^\s@.]+$").expect("email pattern is valid")
    })
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"^(?:\(\d{2}\)|\d{2})\s?\d{4,5}-?\d{4}$").expect("phone pattern is valid")
    })
}

// =============================================================================
// Tax Documents
// =============================================================================

/// Converts an ASCII digit string into its numeric digits.
fn digits_of(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Validates a CPF (individual taxpayer number).
///
/// ## Rules
/// - Punctuation is ignored (`529.982.247-25` == `52998224725`)
/// - Exactly 11 digits after stripping
/// - Not all digits identical (`111.111.111-11` is rejected)
/// - Both check digits match the modulo-11 computation
///
/// ## Check Digits
/// ```text
/// d1: Σ digit[i] × (10 - i)  for i in 0..9    → (sum × 10) mod 11, 10 → 0
/// d2: Σ digit[i] × (11 - i)  for i in 0..10   → (sum × 10) mod 11, 10 → 0
/// ```
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_cpf;
///
/// assert!(validate_cpf("529.982.247-25"));
/// assert!(!validate_cpf("123.456.789-00"));
/// ```
pub fn validate_cpf(cpf: &str) -> bool {
    let digits = digits_of(&only_digits(cpf));
    if digits.len() != CPF_LEN || all_same(&digits) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let weight_start = len as u32 + 1;
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (weight_start - i as u32))
            .sum();
        match (sum * 10) % 11 {
            10 => 0,
            rem => rem,
        }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

/// Validates a CNPJ (company taxpayer number).
///
/// Same shape rules as [`validate_cpf`] with 14 digits and the CNPJ weight
/// tables. A check digit is 0 when `sum mod 11 < 2`, otherwise
/// `11 - sum mod 11`.
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_cnpj;
///
/// assert!(validate_cnpj("11.222.333/0001-81"));
/// assert!(!validate_cnpj("11.111.111/1111-11"));
/// ```
pub fn validate_cnpj(cnpj: &str) -> bool {
    let digits = digits_of(&only_digits(cnpj));
    if digits.len() != CNPJ_LEN || all_same(&digits) {
        return false;
    }

    let check = |weights: &[u32]| -> u32 {
        let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
        match sum % 11 {
            r if r < 2 => 0,
            r => 11 - r,
        }
    };

    check(&CNPJ_FIRST_WEIGHTS) == digits[12] && check(&CNPJ_SECOND_WEIGHTS) == digits[13]
}

/// Validates either document type, dispatching on the stripped digit count.
///
/// Anything that is neither 11 nor 14 digits is rejected.
pub fn validate_cpf_cnpj(document: &str) -> bool {
    match only_digits(document).len() {
        CPF_LEN => validate_cpf(document),
        CNPJ_LEN => validate_cnpj(document),
        _ => false,
    }
}

// =============================================================================
// Contact Information
// =============================================================================

/// Validates a `local@domain.tld` email shape.
///
/// Rejects whitespace, a missing or empty local part, a domain without a
/// dot, a domain starting with a dot, and an empty last segment.
pub fn validate_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Validates a Brazilian phone number.
///
/// Accepts 10-digit landlines and 11-digit mobiles, bare or punctuated as
/// `(AA) NNNN-NNNN` / `(AA) NNNNN-NNNN`.
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_phone;
///
/// assert!(validate_phone("(11) 99999-9999"));
/// assert!(validate_phone("1133333333"));
/// assert!(!validate_phone("123"));
/// ```
pub fn validate_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone)
}

// =============================================================================
// Monetary Values
// =============================================================================

/// Validates a monetary amount: finite and non-negative.
pub fn validate_currency(value: f64) -> bool {
    validate_currency_with(value, &ValidationLimits::default())
}

/// [`validate_currency`] under explicit limits.
///
/// With `allow_non_finite_currency` set, infinities pass (as long as they
/// are not negative). `NaN` never passes since it is not `>= 0`.
pub fn validate_currency_with(value: f64, limits: &ValidationLimits) -> bool {
    if !value.is_finite() && !limits.allow_non_finite_currency {
        return false;
    }
    value >= 0.0
}

/// Validates a pt-BR formatted amount such as `"1.234,56"`.
///
/// `.` is read as the thousands separator and `,` as the decimal separator.
/// The remainder must parse as a plain decimal number in full.
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_currency_str;
///
/// assert!(validate_currency_str("1.234,56"));
/// assert!(validate_currency_str("100"));
/// assert!(!validate_currency_str("-100,00"));
/// assert!(!validate_currency_str("abc"));
/// ```
pub fn validate_currency_str(value: &str) -> bool {
    parse_decimal_br(value).is_some_and(validate_currency)
}

/// Parses a pt-BR decimal string into an `f64`.
///
/// Returns `None` for empty input, leftover characters, or spelled-out
/// non-finite values (`inf`, `NaN`).
pub fn parse_decimal_br(value: &str) -> Option<f64> {
    let normalized = value.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    // Reject the spellings f64::from_str accepts but users never type
    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    {
        return None;
    }
    normalized.parse::<f64>().ok()
}

// =============================================================================
// Dates
// =============================================================================

/// Date-time layouts without an offset, read as UTC.
const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-time layouts with a numeric offset that RFC 3339 does not cover.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parses an ISO-8601 date or date-time string.
///
/// ## Accepted Shapes
/// - RFC 3339: `2025-01-15T10:30:00Z`, `2025-01-15T10:30:00-03:00`
/// - Date only: `2025-01-15` (midnight UTC)
/// - Local date-time: `2025-01-15T10:30:00`, `2025-01-15T10:30:00.250`,
///   `2025-01-15T10:30` (read as UTC)
/// - Space instead of `T`: `2025-01-15 10:30:00`
/// - Minutes precision with a zone: `2025-01-15T10:30Z`, `2025-01-15T10:30-03:00`
///
/// Calendar validity is enforced: `2025-02-30` does not parse.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Some(dt) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    // A trailing `Z` is UTC, same as no zone at all
    let local = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .unwrap_or(value);

    LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(local, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Validates that a string resolves to a real calendar date.
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_date;
///
/// assert!(validate_date("2025-01-15"));
/// assert!(!validate_date("invalid"));
/// ```
pub fn validate_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// True if `date` is strictly after the current instant.
pub fn is_future_date(date: DateTime<Utc>) -> bool {
    is_future_date_at(date, Utc::now())
}

/// True if `date` is strictly after `now`.
pub fn is_future_date_at(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date > now
}

/// True if `date` is strictly before the current instant.
pub fn is_past_date(date: DateTime<Utc>) -> bool {
    is_past_date_at(date, Utc::now())
}

/// True if `date` is strictly before `now`.
pub fn is_past_date_at(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date < now
}

// =============================================================================
// Domain Ranges
// =============================================================================

/// Validates a plot area in hectares: `(0, 1_000_000]`.
pub fn validate_area(area: f64) -> bool {
    validate_area_with(area, &ValidationLimits::default())
}

/// Validates a plot area against `limits.max_area_ha` (inclusive).
pub fn validate_area_with(area: f64, limits: &ValidationLimits) -> bool {
    area > 0.0 && area <= limits.max_area_ha
}

/// Validates a stock quantity.
///
/// ## Rules
/// - `quantity >= 0`
/// - `quantity >= minimum` when a minimum is configured for the item
pub fn validate_stock_quantity(quantity: f64, minimum: Option<f64>) -> bool {
    if quantity < 0.0 || quantity.is_nan() {
        return false;
    }
    minimum.map_or(true, |min| quantity >= min)
}

/// Validates an NF-e access key: exactly 44 ASCII digits, nothing else.
///
/// Unlike the document validators, punctuation is NOT stripped.
pub fn validate_nfe_access_key(key: &str) -> bool {
    key.len() == NFE_KEY_LEN && key.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Generic Field Validators
// =============================================================================

/// Whether a value counts as "filled in" for a required field.
///
/// ## Semantics
/// ```text
/// ┌────────────────────────┬──────────┐
/// │ value                  │ present? │
/// ├────────────────────────┼──────────┤
/// │ "" / "   "             │ no       │
/// │ None                   │ no       │
/// │ empty Vec / slice      │ no       │
/// │ 0, 0.0                 │ yes      │
/// │ false                  │ yes      │
/// └────────────────────────┴──────────┘
/// ```
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl<T> Presence for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

macro_rules! always_present {
    ($($ty:ty),*) => {
        $(
            impl Presence for $ty {
                fn is_present(&self) -> bool {
                    true
                }
            }
        )*
    };
}

always_present!(bool, i32, i64, u32, u64, usize, f64);

/// Validates that a required field has a value. See [`Presence`].
///
/// ## Example
/// ```rust
/// use agro_core::validation::validate_required;
///
/// assert!(validate_required("texto"));
/// assert!(validate_required(&0));
/// assert!(!validate_required(""));
/// assert!(!validate_required(&Vec::<i32>::new()));
/// assert!(!validate_required(&None::<String>));
/// ```
pub fn validate_required<T: Presence + ?Sized>(value: &T) -> bool {
    value.is_present()
}

/// True if `value` has at least `min` characters.
pub fn validate_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// True if `value` has at most `max` characters.
pub fn validate_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// True if `min <= value <= max`.
pub fn validate_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_cpf() {
        assert!(validate_cpf("529.982.247-25"));
        assert!(validate_cpf("52998224725"));

        assert!(!validate_cpf("111.111.111-11"));
        assert!(!validate_cpf("123.456.789-00"));
        assert!(!validate_cpf("123"));
        assert!(!validate_cpf(""));
        assert!(!validate_cpf("1234567890"));
        assert!(!validate_cpf("123456789012"));
    }

    #[test]
    fn test_validate_cnpj() {
        assert!(validate_cnpj("11.222.333/0001-81"));
        assert!(validate_cnpj("11222333000181"));

        assert!(!validate_cnpj("11.111.111/1111-11"));
        assert!(!validate_cnpj("12.345.678/0001-00"));
        assert!(!validate_cnpj("123"));
        assert!(!validate_cnpj(""));
    }

    #[test]
    fn test_validate_cpf_cnpj_dispatch() {
        assert!(validate_cpf_cnpj("529.982.247-25"));
        assert!(validate_cpf_cnpj("11.222.333/0001-81"));
        assert!(!validate_cpf_cnpj("123456"));
        assert!(!validate_cpf_cnpj(""));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("teste@email.com"));
        assert!(validate_email("usuario.nome@empresa.com.br"));

        assert!(!validate_email("email"));
        assert!(!validate_email("email@"));
        assert!(!validate_email("@email.com"));
        assert!(!validate_email("email@.com"));
        assert!(!validate_email("email@dominio"));
        assert!(!validate_email("email@dominio."));
        assert!(!validate_email("em ail@dominio.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("(11) 99999-9999"));
        assert!(validate_phone("(11) 3333-3333"));
        assert!(validate_phone("11999999999"));
        assert!(validate_phone("1133333333"));

        assert!(!validate_phone("123"));
        assert!(!validate_phone(""));
        assert!(!validate_phone("119999999999"));
    }

    #[test]
    fn test_validate_currency() {
        assert!(validate_currency(100.0));
        assert!(validate_currency(0.0));
        assert!(validate_currency(1234.56));

        assert!(!validate_currency(-100.0));
        assert!(!validate_currency(f64::INFINITY));
        assert!(!validate_currency(f64::NAN));
    }

    #[test]
    fn test_validate_currency_with_permissive_limits() {
        let limits = ValidationLimits {
            allow_non_finite_currency: true,
            ..ValidationLimits::default()
        };
        assert!(validate_currency_with(f64::INFINITY, &limits));
        assert!(!validate_currency_with(f64::NEG_INFINITY, &limits));
        assert!(!validate_currency_with(f64::NAN, &limits));
    }

    #[test]
    fn test_validate_currency_str() {
        assert!(validate_currency_str("1.234,56"));
        assert!(validate_currency_str("0,50"));
        assert!(validate_currency_str("1000"));

        assert!(!validate_currency_str("-1,00"));
        assert!(!validate_currency_str(""));
        assert!(!validate_currency_str("R$ 10,00"));
        assert!(!validate_currency_str("inf"));
        assert!(!validate_currency_str("NaN"));
    }

    #[test]
    fn test_parse_decimal_br() {
        assert_eq!(parse_decimal_br("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal_br(" 150 "), Some(150.0));
        assert_eq!(parse_decimal_br("12,5"), Some(12.5));
        assert_eq!(parse_decimal_br("abc"), None);
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2025-01-15"));
        assert!(validate_date("2025-12-31"));
        assert!(validate_date("2025-01-15T10:30:00Z"));
        assert!(validate_date("2025-01-15T10:30:00-03:00"));
        assert!(validate_date("2025-01-15T10:30:00"));
        assert!(validate_date("2025-01-15T10:30:00.250"));
        assert!(validate_date("2025-01-15T10:30"));
        assert!(validate_date("2025-01-15T10:30Z"));
        assert!(validate_date("2025-01-15T10:30-03:00"));
        assert!(validate_date("2025-01-15 10:30:00"));
        assert!(validate_date("2025-01-15 10:30"));
        assert!(validate_date("2025-01-15 10:30:00Z"));

        assert!(!validate_date("2025-01-15T25:30"));
        assert!(!validate_date("2025-02-30T10:30"));
        assert!(!validate_date("invalid"));
        assert!(!validate_date("2025-02-30"));
        assert!(!validate_date("15/01/2025"));
        assert!(!validate_date(""));
    }

    #[test]
    fn test_parse_date_normalizes_to_utc() {
        let parsed = parse_date("2025-01-15T10:30:00-03:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-01-15T13:30:00+00:00");

        let midnight = parse_date("2025-01-15").unwrap();
        assert_eq!(midnight.to_rfc3339(), "2025-01-15T00:00:00+00:00");

        // datetime-local input has no seconds
        let local = parse_date("2025-01-15T10:30").unwrap();
        assert_eq!(local.to_rfc3339(), "2025-01-15T10:30:00+00:00");
        assert_eq!(parse_date("2025-01-15T10:30Z"), Some(local));
        assert_eq!(parse_date("2025-01-15 10:30:00"), Some(local));

        let offset = parse_date("2025-01-15T10:30-03:00").unwrap();
        assert_eq!(offset.to_rfc3339(), "2025-01-15T13:30:00+00:00");
    }

    #[test]
    fn test_future_and_past() {
        let now = Utc::now();
        assert!(is_future_date(now + Duration::days(365)));
        assert!(!is_future_date(now - Duration::days(365)));
        assert!(is_past_date(now - Duration::days(365)));
        assert!(!is_past_date(now + Duration::days(365)));

        // Strict comparison
        assert!(!is_future_date_at(now, now));
        assert!(!is_past_date_at(now, now));
    }

    #[test]
    fn test_validate_area() {
        assert!(validate_area(100.0));
        assert!(validate_area(0.5));
        assert!(validate_area(500_000.0));
        assert!(validate_area(1_000_000.0));

        assert!(!validate_area(0.0));
        assert!(!validate_area(-10.0));
        assert!(!validate_area(2_000_000.0));
    }

    #[test]
    fn test_validate_area_with_custom_limit() {
        let limits = ValidationLimits {
            max_area_ha: 5_000.0,
            ..ValidationLimits::default()
        };
        assert!(validate_area_with(5_000.0, &limits));
        assert!(!validate_area_with(5_000.5, &limits));
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(100.0, Some(50.0)));
        assert!(validate_stock_quantity(0.0, None));
        assert!(validate_stock_quantity(50.0, Some(50.0)));

        assert!(!validate_stock_quantity(30.0, Some(50.0)));
        assert!(!validate_stock_quantity(-1.0, None));
    }

    #[test]
    fn test_validate_nfe_access_key() {
        assert!(validate_nfe_access_key("35250112345678000190550010000124501000124501"));

        assert!(!validate_nfe_access_key("123"));
        assert!(!validate_nfe_access_key(""));
        assert!(!validate_nfe_access_key("3525011234567800019055001000012450100012450A"));
        assert!(!validate_nfe_access_key("3525 0112 3456 7800 0190 5500 1000 0124 5010 0012 4501"));
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("texto"));
        assert!(validate_required(&123));
        assert!(validate_required(&0));
        assert!(validate_required(&0.0));
        assert!(validate_required(&vec![1, 2, 3]));
        assert!(validate_required(&true));
        assert!(validate_required(&false));
        assert!(validate_required(&Some("x".to_string())));

        assert!(!validate_required(""));
        assert!(!validate_required("   "));
        assert!(!validate_required(&None::<i64>));
        assert!(!validate_required(&Some(String::new())));
        assert!(!validate_required(&Vec::<i32>::new()));
        assert!(!validate_required::<[i32]>(&[]));
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_min_length("teste", 3));
        assert!(validate_min_length("abc", 3));
        assert!(!validate_min_length("ab", 3));

        assert!(validate_max_length("teste", 10));
        assert!(validate_max_length("abc", 3));
        assert!(!validate_max_length("texto muito longo", 5));

        // Counted in characters, not bytes
        assert!(validate_max_length("soja é", 6));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5.0, 1.0, 10.0));
        assert!(validate_range(1.0, 1.0, 10.0));
        assert!(validate_range(10.0, 1.0, 10.0));

        assert!(!validate_range(0.0, 1.0, 10.0));
        assert!(!validate_range(11.0, 1.0, 10.0));
    }
}
