//! # Policy Limits
//!
//! Tunable constants consumed by validators and tax calculations.
//!
//! The defaults reproduce the values the mobile app ships with. Deployments
//! can override them through the store's config file (`[limits]` and
//! `[taxes]` tables) without touching the core.

use serde::{Deserialize, Serialize};

use crate::calculations::DEFAULT_FUNRURAL_RATE;

/// Largest plot area accepted by the area validator, in hectares.
pub const DEFAULT_MAX_AREA_HA: f64 = 1_000_000.0;

/// Limits applied by the domain-range validators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Inclusive upper bound for `validate_area_with`.
    #[serde(default = "default_max_area_ha")]
    pub max_area_ha: f64,

    /// Accept `inf`/`NaN` in the currency validator.
    /// Default: false
    #[serde(default)]
    pub allow_non_finite_currency: bool,
}

fn default_max_area_ha() -> f64 {
    DEFAULT_MAX_AREA_HA
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            max_area_ha: default_max_area_ha(),
            allow_non_finite_currency: false,
        }
    }
}

/// Tax parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// FUNRURAL withholding rate, as a percentage (2.3 = 2.3%).
    #[serde(default = "default_funrural_rate")]
    pub funrural_rate: f64,
}

fn default_funrural_rate() -> f64 {
    DEFAULT_FUNRURAL_RATE
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            funrural_rate: default_funrural_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = ValidationLimits::default();
        assert_eq!(limits.max_area_ha, 1_000_000.0);
        assert!(!limits.allow_non_finite_currency);
        assert_eq!(TaxSettings::default().funrural_rate, 2.3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let limits: ValidationLimits = serde_json::from_str(r#"{"max_area_ha": 5000.0}"#).unwrap();
        assert_eq!(limits.max_area_ha, 5000.0);
        assert!(!limits.allow_non_finite_currency);

        let taxes: TaxSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(taxes.funrural_rate, 2.3);
    }
}
