//! # Repository Module
//!
//! Collection repositories for the agro entities.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Collection Repositories                              │
//! │                                                                         │
//! │  Screen / seed binary                                                  │
//! │       │                                                                 │
//! │       │  repo.load().await  /  repo.save(&items).await                 │
//! │       ▼                                                                 │
//! │  CollectionRepository<T>  (trait, keyed by T::ENTITY_TYPE)             │
//! │       │                                                                 │
//! │       ├──► SqliteCollectionRepository<T>  one JSON row per entity type │
//! │       │                                                                 │
//! │       └──► InMemoryRepository<T>          tokio RwLock, for tests      │
//! │                                                                         │
//! │  A save replaces the whole collection; there are no per-item updates.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SqliteCollectionRepository`] - Persistent collection in the `collections` table
//! - [`InMemoryRepository`] - Process-local collection

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;
use agro_core::types::{CashFlowEntry, Client, Expense, Farm, Field, PurchaseOrder, Season};

pub mod collection;
pub mod memory;

pub use collection::SqliteCollectionRepository;
pub use memory::InMemoryRepository;

// =============================================================================
// Entity
// =============================================================================

/// A type stored as one named collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key of the collection, e.g. `"seasons"`.
    const ENTITY_TYPE: &'static str;
}

macro_rules! impl_entity {
    ($($ty:ty => $key:literal),+ $(,)?) => {
        $(
            impl Entity for $ty {
                const ENTITY_TYPE: &'static str = $key;
            }
        )+
    };
}

impl_entity!(
    Farm => "farms",
    Season => "seasons",
    Field => "fields",
    Client => "clients",
    PurchaseOrder => "purchase_orders",
    Expense => "expenses",
    CashFlowEntry => "cash_flow",
);

// =============================================================================
// CollectionRepository
// =============================================================================

/// Loads and saves the whole collection of one entity type.
#[async_trait]
pub trait CollectionRepository<T: Entity>: Send + Sync {
    /// Returns the stored items. A collection never saved loads as empty.
    async fn load(&self) -> StoreResult<Vec<T>>;

    /// Replaces the stored collection with `items`.
    async fn save(&self, items: &[T]) -> StoreResult<()>;
}
