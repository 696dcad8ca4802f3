//! # SQLite Collection Repository
//!
//! Stores each entity type as a single JSON array in the `collections` table.
//!
//! ## Row Layout
//! ```text
//! ┌───────────────┬──────────────────────────────┬────────────┬──────────────┐
//! │ entity_type   │ payload                      │ item_count │ updated_at   │
//! ├───────────────┼──────────────────────────────┼────────────┼──────────────┤
//! │ seasons       │ [{"id":"…","name":"…",…}]    │ 3          │ RFC 3339     │
//! │ cash_flow     │ [{"date":"2025-01-16T…",…}]  │ 12         │ RFC 3339     │
//! └───────────────┴──────────────────────────────┴────────────┴──────────────┘
//! ```
//! Dates in the payload are ISO-8601 strings and come back as `DateTime<Utc>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::marker::PhantomData;
use tracing::debug;

use super::{CollectionRepository, Entity};
use crate::error::{StoreError, StoreResult};

/// Repository for one entity collection in SQLite.
#[derive(Debug)]
pub struct SqliteCollectionRepository<T> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

// Derived Clone would require `T: Clone` on the marker
impl<T> Clone for SqliteCollectionRepository<T> {
    fn clone(&self) -> Self {
        SqliteCollectionRepository {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> SqliteCollectionRepository<T> {
    /// Creates a repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCollectionRepository {
            pool,
            _entity: PhantomData,
        }
    }

    /// Number of items in the stored collection, without decoding it.
    pub async fn count(&self) -> StoreResult<usize> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT item_count FROM collections WHERE entity_type = ?")
                .bind(T::ENTITY_TYPE)
                .fetch_optional(&self.pool)
                .await?;

        Ok(count.unwrap_or(0) as usize)
    }

    /// When the collection was last saved, if ever.
    pub async fn updated_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT updated_at FROM collections WHERE entity_type = ?")
                .bind(T::ENTITY_TYPE)
                .fetch_optional(&self.pool)
                .await?;

        raw.map(|value| {
            DateTime::parse_from_rfc3339(&value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::Internal(format!("bad updated_at '{value}': {e}")))
        })
        .transpose()
    }
}

#[async_trait]
impl<T: Entity> CollectionRepository<T> for SqliteCollectionRepository<T> {
    async fn load(&self) -> StoreResult<Vec<T>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM collections WHERE entity_type = ?")
                .bind(T::ENTITY_TYPE)
                .fetch_optional(&self.pool)
                .await?;

        let Some(payload) = payload else {
            debug!(entity_type = T::ENTITY_TYPE, "No stored collection");
            return Ok(Vec::new());
        };

        let items: Vec<T> = serde_json::from_str(&payload)
            .map_err(|e| StoreError::serialization(T::ENTITY_TYPE, e))?;

        debug!(entity_type = T::ENTITY_TYPE, count = items.len(), "Loaded collection");
        Ok(items)
    }

    async fn save(&self, items: &[T]) -> StoreResult<()> {
        let payload = serde_json::to_string(items)
            .map_err(|e| StoreError::serialization(T::ENTITY_TYPE, e))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO collections (entity_type, payload, item_count, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(entity_type) DO UPDATE SET
                payload = excluded.payload,
                item_count = excluded.item_count,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(T::ENTITY_TYPE)
        .bind(&payload)
        .bind(items.len() as i64)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(entity_type = T::ENTITY_TYPE, count = items.len(), "Saved collection");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use agro_core::types::{
        new_id, CashFlowEntry, Client, ClientKind, Expense, Farm, FlowDirection, FlowStatus,
        Season, SeasonStatus,
    };
    use agro_core::Money;
    use chrono::TimeZone;

    fn season(name: &str) -> Season {
        Season {
            id: new_id(),
            name: name.to_string(),
            crop: "Soja".to_string(),
            status: SeasonStatus::Active,
            area: 150.0,
            budgeted_cost: Money::from_reais(300_000.0),
            actual_cost: Money::from_reais(285_000.0),
            budgeted_revenue: Money::from_reais(450_000.0),
            actual_revenue: Money::from_reais(0.0),
            expected_yield: 9_000.0,
            actual_yield: 0.0,
            created_at: Utc.with_ymd_and_hms(2024, 9, 15, 12, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_round_trip_keeps_dates() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.repository::<CashFlowEntry>();

        let entry = CashFlowEntry {
            id: new_id(),
            date: Utc.with_ymd_and_hms(2025, 1, 16, 0, 0, 0).unwrap(),
            description: "Venda de soja".to_string(),
            direction: FlowDirection::Inflow,
            amount: Money::from_reais(180_000.0),
            status: FlowStatus::Realized,
            category: "Vendas".to_string(),
            operation: "Sede".to_string(),
        };
        repo.save(std::slice::from_ref(&entry)).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, vec![entry]);
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.updated_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expense_dates_survive_storage() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.repository::<Expense>();

        let approved = Expense {
            id: new_id(),
            description: "Defensivos - Fungicida".to_string(),
            category: "Insumos".to_string(),
            supplier: Some("AgroVale".to_string()),
            season_id: None,
            amount: Money::from_reais(32_000.0),
            date: Utc.with_ymd_and_hms(2025, 1, 8, 0, 0, 0).unwrap(),
            due_date: Utc.with_ymd_and_hms(2025, 2, 8, 0, 0, 0).unwrap(),
            competence: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 8, 10, 15, 0).unwrap(),
            approved_at: Some(Utc.with_ymd_and_hms(2025, 1, 9, 8, 0, 0).unwrap()),
            paid_at: Some(Utc.with_ymd_and_hms(2025, 2, 7, 16, 45, 0).unwrap()),
            paid: true,
        };
        let pending = Expense {
            id: new_id(),
            description: "Frete".to_string(),
            approved_at: None,
            paid_at: None,
            paid: false,
            ..approved.clone()
        };
        repo.save(&[approved.clone(), pending.clone()]).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), vec![approved, pending]);

        let payload: String =
            sqlx::query_scalar("SELECT payload FROM collections WHERE entity_type = 'expenses'")
                .fetch_one(store.pool())
                .await
                .unwrap();
        let raw: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(raw[0]["competence"], "2025-01-01T00:00:00Z");
        assert_eq!(raw[0]["paidAt"], "2025-02-07T16:45:00Z");
        assert!(raw[1]["approvedAt"].is_null());
    }

    #[tokio::test]
    async fn test_farms_and_client_activity_round_trip() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();

        let farms = vec![
            Farm {
                id: new_id(),
                name: "Fazenda Santa Rita".to_string(),
                location: "Sorriso - MT".to_string(),
                size: 850.0,
                active: true,
            },
            Farm {
                id: new_id(),
                name: "Sítio São José".to_string(),
                location: "Rio Verde - GO".to_string(),
                size: 120.5,
                active: false,
            },
        ];
        store.repository::<Farm>().save(&farms).await.unwrap();

        let client = Client {
            id: new_id(),
            name: "Cerealista Norte".to_string(),
            kind: ClientKind::Company,
            document: "11222333000181".to_string(),
            email: None,
            phone: Some("65999998888".to_string()),
            active: false,
            created_at: Utc.with_ymd_and_hms(2024, 11, 3, 9, 0, 0).unwrap(),
        };
        store
            .repository::<Client>()
            .save(std::slice::from_ref(&client))
            .await
            .unwrap();

        assert_eq!(store.repository::<Farm>().load().await.unwrap(), farms);
        assert_eq!(store.repository::<Client>().load().await.unwrap(), vec![client]);
        assert_eq!(store.entity_types().await.unwrap(), vec!["clients", "farms"]);
    }

    #[tokio::test]
    async fn test_missing_collection_loads_empty() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.repository::<Season>();

        assert!(repo.load().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.updated_at().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.repository::<Season>();

        repo.save(&[season("Safra 2023/24"), season("Safra 2024/25")])
            .await
            .unwrap();
        repo.save(&[season("Safrinha Milho 2025")]).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Safrinha Milho 2025");
        assert_eq!(store.entity_types().await.unwrap(), vec!["seasons"]);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_serialization_error() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        sqlx::query(
            "INSERT INTO collections (entity_type, payload, item_count, updated_at) \
             VALUES ('seasons', '[{\"status\":\"harvesting\"}]', 1, '2025-01-01T00:00:00Z')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let err = store.repository::<Season>().load().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Serialization { ref entity_type, .. } if entity_type == "seasons"
        ));
    }
}
