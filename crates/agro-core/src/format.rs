//! # Boundary Formatting (pt-BR)
//!
//! String conversions for the screens. The calculation engine never sees
//! these strings: it works on `f64` and [`Money`], and this module turns
//! results into what a Brazilian user expects to read.
//!
//! ```text
//! ┌──────────────────────────┬───────────────────────────┐
//! │ value                    │ rendered                  │
//! ├──────────────────────────┼───────────────────────────┤
//! │ Money(123456)            │ R$ 1.234,56               │
//! │ Money(-50)               │ -R$ 0,50                  │
//! │ 1234.5 (2 decimals)      │ 1.234,50                  │
//! │ "52998224725"            │ 529.982.247-25            │
//! │ "11222333000181"         │ 11.222.333/0001-81        │
//! │ "11999999999"            │ (11) 99999-9999           │
//! └──────────────────────────┴───────────────────────────┘
//! ```

use crate::money::Money;
use crate::validation::parse_decimal_br;

/// Keeps only the ASCII digits of `value`.
///
/// ## Example
/// ```rust
/// use agro_core::format::only_digits;
///
/// assert_eq!(only_digits("529.982.247-25"), "52998224725");
/// ```
pub fn only_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Inserts `.` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Currency
// =============================================================================

/// Formats centavos as Brazilian reais: `R$ 1.234,56`.
///
/// ## Example
/// ```rust
/// use agro_core::format::format_brl;
/// use agro_core::money::Money;
///
/// assert_eq!(format_brl(Money::from_centavos(123_456)), "R$ 1.234,56");
/// assert_eq!(format_brl(Money::from_centavos(-5_000)), "-R$ 50,00");
/// ```
pub fn format_brl(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let reais = group_thousands(&amount.reais().unsigned_abs().to_string());
    format!("{}R$ {},{:02}", sign, reais, amount.centavos_part())
}

/// Formats a plain number with pt-BR separators and a fixed number of decimals.
///
/// Non-finite values are rendered with their Rust spelling (`inf`, `NaN`),
/// which is what a break-even of "never" looks like before the screen
/// substitutes its own label.
pub fn format_decimal_br(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    // -0,00 reads as a bug on screen
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{},{}", sign, group_thousands(int_part), frac),
        None => format!("{}{}", sign, group_thousands(int_part)),
    }
}

/// Parses user-typed reais such as `"R$ 1.234,56"`, `"1.234,56"` or `"-50"`.
///
/// Returns `None` for anything that is not a finite amount.
pub fn parse_brl(value: &str) -> Option<Money> {
    let value = value.trim();
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, value),
    };
    let rest = rest.strip_prefix("R$").unwrap_or(rest).trim();

    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let reais = parse_decimal_br(rest).filter(|v| v.is_finite() && *v >= 0.0)?;
    let amount = Money::from_reais(reais);
    Some(if negative { -amount } else { amount })
}

// =============================================================================
// Documents & Phones
// =============================================================================

/// Formats an 11-digit CPF as `000.000.000-00`.
pub fn format_cpf(cpf: &str) -> Option<String> {
    let d = only_digits(cpf);
    if d.len() != 11 {
        return None;
    }
    Some(format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]))
}

/// Formats a 14-digit CNPJ as `00.000.000/0000-00`.
pub fn format_cnpj(cnpj: &str) -> Option<String> {
    let d = only_digits(cnpj);
    if d.len() != 14 {
        return None;
    }
    Some(format!(
        "{}.{}.{}/{}-{}",
        &d[0..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..14]
    ))
}

/// Formats a CPF or CNPJ depending on its digit count.
pub fn format_document(document: &str) -> Option<String> {
    match only_digits(document).len() {
        11 => format_cpf(document),
        14 => format_cnpj(document),
        _ => None,
    }
}

/// Formats a 10-digit landline or 11-digit mobile number.
///
/// ## Example
/// ```rust
/// use agro_core::format::format_phone;
///
/// assert_eq!(format_phone("11999999999").as_deref(), Some("(11) 99999-9999"));
/// assert_eq!(format_phone("1133333333").as_deref(), Some("(11) 3333-3333"));
/// assert_eq!(format_phone("123"), None);
/// ```
pub fn format_phone(phone: &str) -> Option<String> {
    let d = only_digits(phone);
    match d.len() {
        10 => Some(format!("({}) {}-{}", &d[0..2], &d[2..6], &d[6..10])),
        11 => Some(format!("({}) {}-{}", &d[0..2], &d[2..7], &d[7..11])),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
