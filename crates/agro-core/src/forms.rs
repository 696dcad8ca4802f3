//! # Entity Forms
//!
//! Typed validation for the create/edit forms. The boolean checks in
//! [`validation`](crate::validation) answer "is this value OK?"; forms turn
//! the answers into one [`ValidationError`] per failing field so the screen
//! can highlight every problem at once.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SeasonForm { name: "", area: "abc", ... }                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate(&limits)                                                      │
//! │       │                                                                 │
//! │       ├── Err(FormErrors [Required{name}, InvalidFormat{area}])        │
//! │       │                                                                 │
//! │       └── Ok(()) ──► into_season(&limits) ──► Season { id, ... }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form fields are the raw strings typed by the user. Error field names
//! are the camelCase keys the screens bind to.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{FormErrors, ValidationError};
use crate::format::only_digits;
use crate::limits::ValidationLimits;
use crate::money::Money;
use crate::types::{new_id, Client, ClientKind, Field, FieldStatus, Season, SeasonStatus};
use crate::validation::{
    parse_decimal_br, validate_area_with, validate_cpf_cnpj, validate_currency_with,
    validate_email, validate_max_length, validate_min_length, validate_phone, validate_range,
    validate_required,
};

/// Crop shown for fields created without one.
pub const UNDEFINED_CROP: &str = "Não definida";

/// Client name length bounds, in characters.
pub const MIN_CLIENT_NAME_LEN: usize = 2;
pub const MAX_CLIENT_NAME_LEN: usize = 200;

// =============================================================================
// Field Helpers
// =============================================================================

/// Parses a number typed into a form.
///
/// A comma marks pt-BR input (`"1.234,56"`); otherwise the value is read
/// as a plain decimal (`"1234.56"`).
pub fn parse_form_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.contains(',') {
        return parse_decimal_br(value);
    }
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
        return None;
    }
    value.parse().ok()
}

fn require(errors: &mut FormErrors, field: &str, value: &str) {
    if !validate_required(value) {
        errors.push(ValidationError::Required {
            field: field.to_string(),
        });
    }
}

fn not_a_number(field: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a number".to_string(),
    }
}

/// Parses an optional numeric input. Empty means 0.
fn optional_number(errors: &mut FormErrors, field: &str, value: &str) -> Option<f64> {
    if !validate_required(value) {
        return Some(0.0);
    }
    let parsed = parse_form_number(value);
    if parsed.is_none() {
        errors.push(not_a_number(field));
    }
    parsed
}

fn check_amount(errors: &mut FormErrors, field: &str, value: &str, limits: &ValidationLimits) -> f64 {
    match optional_number(errors, field, value) {
        Some(amount) if validate_currency_with(amount, limits) => amount,
        Some(_) => {
            errors.push(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "must be a non-negative amount".to_string(),
            });
            0.0
        }
        None => 0.0,
    }
}

fn check_area(errors: &mut FormErrors, field: &str, area: f64, limits: &ValidationLimits) {
    if !validate_area_with(area, limits) {
        errors.push(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: limits.max_area_ha,
        });
    }
}

fn optional_text(value: &str) -> Option<String> {
    validate_required(value).then(|| value.trim().to_string())
}

// =============================================================================
// Season Form
// =============================================================================

/// New-season form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonForm {
    pub name: String,
    pub crop: String,
    pub area: String,
    pub budgeted_cost: String,
    pub budgeted_revenue: String,
    pub expected_yield: String,
    pub status: SeasonStatus,
}

/// Parsed numeric inputs of a season form.
struct SeasonNumbers {
    area: f64,
    budgeted_cost: f64,
    budgeted_revenue: f64,
    expected_yield: f64,
}

impl SeasonForm {
    fn check(&self, limits: &ValidationLimits) -> (FormErrors, SeasonNumbers) {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "crop", &self.crop);

        // Area may be left blank while planning, but must be in range once typed
        let area = match optional_number(&mut errors, "area", &self.area) {
            Some(area) if validate_required(self.area.as_str()) => {
                check_area(&mut errors, "area", area, limits);
                area
            }
            Some(area) => area,
            None => 0.0,
        };

        let budgeted_cost = check_amount(&mut errors, "budgetedCost", &self.budgeted_cost, limits);
        let budgeted_revenue =
            check_amount(&mut errors, "budgetedRevenue", &self.budgeted_revenue, limits);

        let expected_yield = match optional_number(&mut errors, "expectedYield", &self.expected_yield) {
            Some(y) if validate_range(y, 0.0, f64::MAX) => y,
            Some(_) => {
                errors.push(ValidationError::OutOfRange {
                    field: "expectedYield".to_string(),
                    min: 0.0,
                    max: f64::MAX,
                });
                0.0
            }
            None => 0.0,
        };

        let numbers = SeasonNumbers {
            area,
            budgeted_cost,
            budgeted_revenue,
            expected_yield,
        };
        (errors, numbers)
    }

    /// Validates every field.
    pub fn validate(&self, limits: &ValidationLimits) -> Result<(), FormErrors> {
        self.check(limits).0.into_result()
    }

    /// Validates and builds a new [`Season`] with zeroed actuals.
    pub fn into_season(self, limits: &ValidationLimits) -> Result<Season, FormErrors> {
        let (errors, numbers) = self.check(limits);
        errors.into_result()?;

        Ok(Season {
            id: new_id(),
            name: self.name.trim().to_string(),
            crop: self.crop.trim().to_string(),
            status: self.status,
            area: numbers.area,
            budgeted_cost: Money::from_reais(numbers.budgeted_cost),
            actual_cost: Money::zero(),
            budgeted_revenue: Money::from_reais(numbers.budgeted_revenue),
            actual_revenue: Money::zero(),
            expected_yield: numbers.expected_yield,
            actual_yield: 0.0,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Field Form
// =============================================================================

/// New-field (talhão) form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldForm {
    pub name: String,
    pub area: String,
    pub crop: String,
    pub status: FieldStatus,
}

impl FieldForm {
    fn check(&self, limits: &ValidationLimits) -> (FormErrors, f64) {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &self.name);

        let mut area = 0.0;
        if !validate_required(self.area.as_str()) {
            errors.push(ValidationError::Required {
                field: "area".to_string(),
            });
        } else {
            match parse_form_number(&self.area) {
                Some(parsed) => {
                    check_area(&mut errors, "area", parsed, limits);
                    area = parsed;
                }
                None => errors.push(not_a_number("area")),
            }
        }

        (errors, area)
    }

    pub fn validate(&self, limits: &ValidationLimits) -> Result<(), FormErrors> {
        self.check(limits).0.into_result()
    }

    /// Validates and builds a new [`Field`] with no economic history.
    pub fn into_field(self, limits: &ValidationLimits) -> Result<Field, FormErrors> {
        let (errors, area) = self.check(limits);
        errors.into_result()?;

        Ok(Field {
            id: new_id(),
            name: self.name.trim().to_string(),
            area,
            crop: optional_text(&self.crop).unwrap_or_else(|| UNDEFINED_CROP.to_string()),
            status: self.status,
            gross_margin: Money::zero(),
            roi: 0.0,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Client Form
// =============================================================================

/// New-client form. Email and phone may be left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientForm {
    pub name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
}

impl ClientForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        let name = self.name.trim();
        require(&mut errors, "name", &self.name);
        if validate_required(name) && !validate_min_length(name, MIN_CLIENT_NAME_LEN) {
            errors.push(ValidationError::TooShort {
                field: "name".to_string(),
                min: MIN_CLIENT_NAME_LEN,
            });
        }
        if !validate_max_length(name, MAX_CLIENT_NAME_LEN) {
            errors.push(ValidationError::TooLong {
                field: "name".to_string(),
                max: MAX_CLIENT_NAME_LEN,
            });
        }

        if !validate_required(self.document.as_str()) {
            errors.push(ValidationError::Required {
                field: "document".to_string(),
            });
        } else if !validate_cpf_cnpj(&self.document) {
            errors.push(ValidationError::InvalidDocument {
                field: "document".to_string(),
            });
        }

        if let Some(email) = optional_text(&self.email) {
            if !validate_email(&email) {
                errors.push(ValidationError::InvalidFormat {
                    field: "email".to_string(),
                    reason: "must look like name@domain.com".to_string(),
                });
            }
        }

        if let Some(phone) = optional_text(&self.phone) {
            if !validate_phone(&phone) {
                errors.push(ValidationError::InvalidFormat {
                    field: "phone".to_string(),
                    reason: "must be a 10 or 11 digit Brazilian number".to_string(),
                });
            }
        }

        errors.into_result()
    }

    /// Validates and builds a new [`Client`]. The document is stored as digits only.
    pub fn into_client(self) -> Result<Client, FormErrors> {
        self.validate()?;

        let kind = ClientKind::from_document(&self.document).ok_or_else(|| {
            let mut errors = FormErrors::new();
            errors.push(ValidationError::InvalidDocument {
                field: "document".to_string(),
            });
            errors
        })?;

        Ok(Client {
            id: new_id(),
            name: self.name.trim().to_string(),
            kind,
            document: only_digits(&self.document),
            email: optional_text(&self.email),
            phone: optional_text(&self.phone),
            active: true,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ValidationLimits {
        ValidationLimits::default()
    }

    #[test]
    fn test_parse_form_number() {
        assert_eq!(parse_form_number("1.234,56"), Some(1234.56));
        assert_eq!(parse_form_number("1234.56"), Some(1234.56));
        assert_eq!(parse_form_number(" 150 "), Some(150.0));
        assert_eq!(parse_form_number("abc"), None);
        assert_eq!(parse_form_number("inf"), None);
        assert_eq!(parse_form_number(""), None);
    }

    #[test]
    fn test_season_form_happy_path() {
        let form = SeasonForm {
            name: " Safra Soja 2024/25 ".to_string(),
            crop: "Soja".to_string(),
            area: "150".to_string(),
            budgeted_cost: "450.000,00".to_string(),
            budgeted_revenue: "720000".to_string(),
            expected_yield: "9000".to_string(),
            status: SeasonStatus::Planning,
        };
        assert!(form.validate(&limits()).is_ok());

        let season = form.into_season(&limits()).unwrap();
        assert_eq!(season.name, "Safra Soja 2024/25");
        assert_eq!(season.area, 150.0);
        assert_eq!(season.budgeted_cost, Money::from_centavos(45_000_000));
        assert_eq!(season.budgeted_revenue, Money::from_centavos(72_000_000));
        assert_eq!(season.actual_cost, Money::zero());
        assert_eq!(season.expected_yield, 9_000.0);
    }

    #[test]
    fn test_season_form_optional_numbers_default_to_zero() {
        let form = SeasonForm {
            name: "Safra Milho".to_string(),
            crop: "Milho".to_string(),
            ..Default::default()
        };
        let season = form.into_season(&limits()).unwrap();
        assert_eq!(season.area, 0.0);
        assert_eq!(season.budgeted_cost, Money::zero());
    }

    #[test]
    fn test_season_form_reports_every_field() {
        let form = SeasonForm {
            area: "abc".to_string(),
            budgeted_cost: "-10".to_string(),
            ..Default::default()
        };
        let errors = form.validate(&limits()).unwrap_err();

        assert_eq!(errors.errors().len(), 4);
        assert!(matches!(errors.for_field("name"), Some(ValidationError::Required { .. })));
        assert!(matches!(errors.for_field("crop"), Some(ValidationError::Required { .. })));
        assert!(matches!(errors.for_field("area"), Some(ValidationError::InvalidFormat { .. })));
        assert!(errors.for_field("budgetedCost").is_some());
    }

    #[test]
    fn test_season_form_area_limit() {
        let form = SeasonForm {
            name: "Safra".to_string(),
            crop: "Soja".to_string(),
            area: "2000000".to_string(),
            ..Default::default()
        };
        let errors = form.validate(&limits()).unwrap_err();
        assert!(matches!(errors.for_field("area"), Some(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_field_form() {
        let form = FieldForm {
            name: "Talhão 3".to_string(),
            area: "42,5".to_string(),
            crop: "  ".to_string(),
            status: FieldStatus::Active,
        };
        let field = form.into_field(&limits()).unwrap();
        assert_eq!(field.area, 42.5);
        assert_eq!(field.crop, UNDEFINED_CROP);
        assert_eq!(field.status, FieldStatus::Active);
    }

    #[test]
    fn test_field_form_requires_area() {
        let form = FieldForm {
            name: "Talhão 3".to_string(),
            ..Default::default()
        };
        let errors = form.validate(&limits()).unwrap_err();
        assert!(matches!(errors.for_field("area"), Some(ValidationError::Required { .. })));

        let form = FieldForm {
            name: "Talhão 3".to_string(),
            area: "0".to_string(),
            ..Default::default()
        };
        let errors = form.validate(&limits()).unwrap_err();
        assert!(matches!(errors.for_field("area"), Some(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_field_form_respects_configured_limit() {
        let strict = ValidationLimits {
            max_area_ha: 100.0,
            ..ValidationLimits::default()
        };
        let form = FieldForm {
            name: "Talhão 3".to_string(),
            area: "150".to_string(),
            ..Default::default()
        };
        assert!(form.validate(&limits()).is_ok());
        assert!(form.validate(&strict).is_err());
    }

    #[test]
    fn test_client_form() {
        let form = ClientForm {
            name: "Cooperativa Agro".to_string(),
            document: "11.222.333/0001-81".to_string(),
            email: "compras@coop.com.br".to_string(),
            phone: String::new(),
        };
        let client = form.into_client().unwrap();
        assert_eq!(client.kind, ClientKind::Company);
        assert_eq!(client.document, "11222333000181");
        assert_eq!(client.email.as_deref(), Some("compras@coop.com.br"));
        assert_eq!(client.phone, None);
    }

    #[test]
    fn test_client_form_errors() {
        let form = ClientForm {
            name: "A".repeat(201),
            document: "123.456.789-00".to_string(),
            email: "email@".to_string(),
            phone: "123".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(matches!(errors.for_field("name"), Some(ValidationError::TooLong { max: 200, .. })));
        assert!(matches!(errors.for_field("document"), Some(ValidationError::InvalidDocument { .. })));
        assert!(errors.for_field("email").is_some());
        assert!(errors.for_field("phone").is_some());
    }

    #[test]
    fn test_client_form_missing_document() {
        let form = ClientForm {
            name: "João da Silva".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(matches!(errors.for_field("document"), Some(ValidationError::Required { .. })));
    }

    #[test]
    fn test_client_name_too_short() {
        let mut form = ClientForm {
            name: " J ".to_string(),
            document: "529.982.247-25".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert!(matches!(errors.for_field("name"), Some(ValidationError::TooShort { min: 2, .. })));
        assert_eq!(
            errors.for_field("name").unwrap().to_string(),
            "name must be at least 2 characters"
        );

        // Blank names report Required only
        form.name = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert!(matches!(errors.for_field("name"), Some(ValidationError::Required { .. })));
        assert_eq!(errors.errors().len(), 1);

        form.name = "Jó".to_string();
        assert!(form.validate().is_ok());
        assert_eq!(form.into_client().unwrap().kind, ClientKind::Individual);
    }
}
