//! # In-Memory Repository
//!
//! A [`CollectionRepository`] that keeps the collection in process memory.
//! Clones share the same collection.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CollectionRepository, Entity};
use crate::error::StoreResult;

/// Collection held behind a tokio `RwLock`.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        InMemoryRepository {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        InMemoryRepository {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        InMemoryRepository {
            items: Arc::new(RwLock::new(items)),
        }
    }
}

#[async_trait]
impl<T: Entity> CollectionRepository<T> for InMemoryRepository<T> {
    async fn load(&self) -> StoreResult<Vec<T>> {
        Ok(self.items.read().await.clone())
    }

    async fn save(&self, items: &[T]) -> StoreResult<()> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::types::{new_id, Expense};
    use agro_core::Money;
    use chrono::Utc;

    fn expense(description: &str) -> Expense {
        Expense {
            id: new_id(),
            description: description.to_string(),
            category: "Insumos".to_string(),
            supplier: Some("AgroVale".to_string()),
            season_id: None,
            amount: Money::from_reais(12_500.0),
            date: Utc::now(),
            due_date: Utc::now(),
            competence: Utc::now(),
            created_at: Utc::now(),
            approved_at: None,
            paid_at: None,
            paid: false,
        }
    }

    #[tokio::test]
    async fn test_clones_share_collection() {
        let repo = InMemoryRepository::<Expense>::new();
        let other = repo.clone();

        assert!(repo.load().await.unwrap().is_empty());
        other.save(&[expense("Fertilizante")]).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description, "Fertilizante");
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let repo: Box<dyn CollectionRepository<Expense>> =
            Box::new(InMemoryRepository::with_items(vec![expense("Diesel")]));

        repo.save(&[]).await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());
    }
}
