//! # App Configuration
//!
//! Store settings and policy limits for the agro app.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     AGRO_DATABASE_PATH=/data/agro.db                                   │
//! │     AGRO_FUNRURAL_RATE=1.5                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/finance/config.toml (Linux)                              │
//! │     ~/Library/Application Support/com.agro.finance/config.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     agro.db in the data dir, 2.3% FUNRURAL, 1,000,000 ha area cap      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # config.toml
//! [store]
//! database_path = "/data/agro.db"
//! max_connections = 5
//!
//! [limits]
//! max_area_ha = 1000000.0
//! allow_non_finite_currency = false
//!
//! [taxes]
//! funrural_rate = 2.3
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::pool::StoreConfig;
use agro_core::{TaxSettings, ValidationLimits};

const DATABASE_FILE: &str = "agro.db";
const CONFIG_FILE: &str = "config.toml";

// =============================================================================
// Store Settings
// =============================================================================

/// Where and how the collection store is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Database file. When unset, `agro.db` in the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Maximum pooled connections.
    /// Default: 5
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            database_path: None,
            max_connections: default_max_connections(),
        }
    }
}

impl StoreSettings {
    /// The configured path, or the platform default.
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("com", "agro", "finance")
                .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
                .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
        })
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub limits: ValidationLimits,

    #[serde(default)]
    pub taxes: TaxSettings,
}

impl AppConfig {
    /// Loads configuration: defaults, then the TOML file, then `AGRO_*`
    /// environment variables, then validation.
    ///
    /// A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading app config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`AppConfig::load`], falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load app config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "App config saved");
        Ok(())
    }

    /// Checks the values a TOML file or environment could have broken.
    pub fn validate(&self) -> StoreResult<()> {
        if self.store.max_connections == 0 {
            return Err(StoreError::Config(
                "store.max_connections must be greater than 0".into(),
            ));
        }

        let max_area = self.limits.max_area_ha;
        if !max_area.is_finite() || max_area <= 0.0 {
            return Err(StoreError::Config(format!(
                "limits.max_area_ha must be a positive number, got {max_area}"
            )));
        }

        let rate = self.taxes.funrural_rate;
        if !(0.0..=100.0).contains(&rate) {
            return Err(StoreError::Config(format!(
                "taxes.funrural_rate must be between 0 and 100, got {rate}"
            )));
        }

        Ok(())
    }

    /// Store pool configuration for these settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.store.resolved_database_path())
            .max_connections(self.store.max_connections)
    }

    /// Replaces the database path when `path` is given, e.g. from a
    /// command-line flag. `None` keeps the configured one.
    pub fn override_database_path(&mut self, path: Option<PathBuf>) {
        if let Some(path) = path {
            debug!(?path, "Overriding database path");
            self.store.database_path = Some(path);
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies `AGRO_*` overrides read through `lookup`.
    ///
    /// Values that don't parse are ignored with a warning.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("AGRO_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.store.database_path = Some(PathBuf::from(path));
        }

        if let Some(max) = lookup("AGRO_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(n) => self.store.max_connections = n,
                Err(_) => warn!(value = %max, "Invalid AGRO_MAX_CONNECTIONS in environment"),
            }
        }

        if let Some(area) = lookup("AGRO_MAX_AREA_HA") {
            match area.parse::<f64>() {
                Ok(a) => self.limits.max_area_ha = a,
                Err(_) => warn!(value = %area, "Invalid AGRO_MAX_AREA_HA in environment"),
            }
        }

        if let Some(rate) = lookup("AGRO_FUNRURAL_RATE") {
            match rate.parse::<f64>() {
                Ok(r) => {
                    debug!(rate = r, "Overriding FUNRURAL rate from environment");
                    self.taxes.funrural_rate = r;
                }
                Err(_) => warn!(value = %rate, "Invalid AGRO_FUNRURAL_RATE in environment"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "agro", "finance")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
