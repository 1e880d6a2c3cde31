//! Persistence interface for promotions.
//!
//! The operations in [`crate::service`] only ever see a `&dyn PromotionStore`.
//! `promo-db` provides the PostgreSQL implementation; [`MemoryPromotionStore`]
//! backs tests and database-less development runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::filter::PromotionFilter;
use crate::promotion::Promotion;
use crate::types::DbId;

#[async_trait]
pub trait PromotionStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    ///
    /// Any id already on `promotion` is ignored. Implementations must
    /// serialize id assignment so ids stay unique.
    async fn insert(&self, promotion: Promotion) -> Result<Promotion, CoreError>;

    /// Replace every mutable field of record `id`.
    ///
    /// Returns `None` if no such record exists.
    async fn update(&self, id: DbId, promotion: Promotion)
        -> Result<Option<Promotion>, CoreError>;

    /// Remove record `id`. Returns `true` if a record was removed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    async fn find(&self, id: DbId) -> Result<Option<Promotion>, CoreError>;

    /// Every record, in insertion order.
    async fn all(&self) -> Result<Vec<Promotion>, CoreError>;

    /// Records accepted by `filter`, in insertion order.
    async fn find_by(&self, filter: &PromotionFilter) -> Result<Vec<Promotion>, CoreError> {
        Ok(filter.apply(self.all().await?))
    }

    /// Whether the backing storage is reachable.
    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryState {
    last_id: DbId,
    records: BTreeMap<DbId, Promotion>,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryPromotionStore {
    state: RwLock<MemoryState>,
}

impl MemoryPromotionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromotionStore for MemoryPromotionStore {
    async fn insert(&self, mut promotion: Promotion) -> Result<Promotion, CoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;
        promotion.id = Some(id);
        state.records.insert(id, promotion.clone());
        Ok(promotion)
    }

    async fn update(
        &self,
        id: DbId,
        mut promotion: Promotion,
    ) -> Result<Option<Promotion>, CoreError> {
        let mut state = self.state.write().await;
        let Some(slot) = state.records.get_mut(&id) else {
            return Ok(None);
        };
        promotion.id = Some(id);
        *slot = promotion.clone();
        Ok(Some(promotion))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.state.write().await.records.remove(&id).is_some())
    }

    async fn find(&self, id: DbId) -> Result<Option<Promotion>, CoreError> {
        Ok(self.state.read().await.records.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Promotion>, CoreError> {
        Ok(self.state.read().await.records.values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
