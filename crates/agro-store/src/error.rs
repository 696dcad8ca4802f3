//! # Store Error Types
//!
//! Error types for persistence and configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / serde_json::Error / io::Error / toml errors             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller shows "could not load seasons" and keeps its in-memory state   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence and configuration errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Pool closed or timed out
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored collection could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - Payload written by a newer app version with an unknown status
    /// - Hand-edited database
    #[error("Serialization error in '{entity_type}': {source}")]
    Serialization {
        entity_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File system error (config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Wraps a JSON error for the given collection.
    pub fn serialization(entity_type: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Serialization {
            entity_type: entity_type.into(),
            source,
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → StoreError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StoreError::ConnectionFailed
/// sqlx::Error::PoolClosed     → StoreError::ConnectionFailed
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("Timed out waiting for a connection".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::Config("max_connections must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_connections must be greater than 0"
        );
    }

    #[test]
    fn test_serialization_error_names_collection() {
        let json_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err = StoreError::serialization("seasons", json_err);
        assert!(err.to_string().starts_with("Serialization error in 'seasons'"));
    }

    #[test]
    fn test_pool_closed_maps_to_connection_failed() {
        let err: StoreError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, StoreError::ConnectionFailed(_)));
    }
}
