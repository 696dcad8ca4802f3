//! # agro-store: Persistence Layer for Agro Finance
//!
//! This crate keeps the app's entity collections in a local SQLite file and
//! loads the app configuration. It uses sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Agro Finance Data Flow                           │
//! │                                                                         │
//! │  Screen (seasons list) / seed binary                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    agro-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Collection<T> │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ InMemory<T>   │    │ 001_collect- │  │   │
//! │  │   │               │    │               │    │ ions.sql     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │            ▲                                                    │   │
//! │  │            │ StoreConfig                                        │   │
//! │  │   ┌───────────────┐                                            │   │
//! │  │   │   AppConfig   │  TOML file + AGRO_* env                    │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/finance/agro.db                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store handle and pool configuration
//! - [`repository`] - `Entity` keys and collection repositories
//! - [`migrations`] - Embedded database migrations
//! - [`config`] - App configuration file and environment overrides
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agro_core::Season;
//! use agro_store::{AppConfig, CollectionRepository, Store};
//!
//! let config = AppConfig::load_or_default(None);
//! let store = Store::new(config.store_config()).await?;
//!
//! let seasons = store.repository::<Season>();
//! let mut all = seasons.load().await?;
//! all.push(new_season);
//! seasons.save(&all).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, StoreSettings};
pub use error::{StoreError, StoreResult};
pub use pool::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::{CollectionRepository, Entity, InMemoryRepository, SqliteCollectionRepository};
