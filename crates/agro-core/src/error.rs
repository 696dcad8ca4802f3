//! # Error Types
//!
//! Domain-specific error types for agro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  agro-core errors (this file)                                          │
//! │  ├── CoreError        - Parsing of statuses/amounts                    │
//! │  ├── ValidationError  - One failed form field                          │
//! │  └── FormErrors       - Every failed field of one form                 │
//! │                                                                         │
//! │  agro-store errors (separate crate)                                    │
//! │  └── StoreError       - Persistence and config failures                │
//! │                                                                         │
//! │  Calculations and boolean validators NEVER return errors:              │
//! │  zero denominators and bad input resolve to sentinels instead.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// Raised at the boundary where loosely-typed input (strings coming from the
/// screens) is turned into closed domain types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status string did not match any variant of the target enum.
    ///
    /// ## When This Occurs
    /// - Stored collection written by an older app version
    /// - Screen passing a filter value like `"all"` where a status is required
    #[error("Unknown {kind} status: '{value}'")]
    UnknownStatus { kind: &'static str, value: String },

    /// A monetary string could not be parsed.
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for a single form field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Invalid format (e.g., not a number, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// CPF/CNPJ failed its check digits.
    #[error("{field} is not a valid CPF or CNPJ")]
    InvalidDocument { field: String },
}

impl ValidationError {
    /// Returns the name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::InvalidDocument { field } => field,
        }
    }
}

// =============================================================================
// Form Errors
// =============================================================================

/// All field errors collected while validating one form.
///
/// Forms report every failing field at once so the screen can highlight
/// all of them in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FormErrors {
    errors: Vec<ValidationError>,
}

impl FormErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field error.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if no error was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the recorded errors in insertion order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the first error recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    /// Converts into `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
