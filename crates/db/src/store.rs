//! [`PromotionStore`] backed by PostgreSQL.

use async_trait::async_trait;
use promo_core::error::CoreError;
use promo_core::promotion::Promotion;
use promo_core::store::PromotionStore;
use promo_core::types::DbId;

use crate::repositories::PromotionRepo;
use crate::DbPool;

/// Adapts [`PromotionRepo`] to the core persistence interface.
///
/// Id uniqueness comes from the `BIGSERIAL` sequence. Searches use the
/// default `find_by`, which filters the ordered `list` result.
#[derive(Debug, Clone)]
pub struct PgPromotionStore {
    pool: DbPool,
}

impl PgPromotionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Promotion storage error");
    CoreError::Internal(err.to_string())
}

#[async_trait]
impl PromotionStore for PgPromotionStore {
    async fn insert(&self, promotion: Promotion) -> Result<Promotion, CoreError> {
        tracing::info!(title = %promotion.title, "Creating promotion");
        PromotionRepo::create(&self.pool, &promotion)
            .await
            .map_err(storage_error)?
            .try_into()
    }

    async fn update(
        &self,
        id: DbId,
        promotion: Promotion,
    ) -> Result<Option<Promotion>, CoreError> {
        tracing::info!(id, title = %promotion.title, "Saving promotion");
        PromotionRepo::update(&self.pool, id, &promotion)
            .await
            .map_err(storage_error)?
            .map(Promotion::try_from)
            .transpose()
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        tracing::info!(id, "Deleting promotion");
        PromotionRepo::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn find(&self, id: DbId) -> Result<Option<Promotion>, CoreError> {
        tracing::debug!(id, "Looking up promotion");
        PromotionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?
            .map(Promotion::try_from)
            .transpose()
    }

    async fn all(&self) -> Result<Vec<Promotion>, CoreError> {
        PromotionRepo::list(&self.pool)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(Promotion::try_from)
            .collect()
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(storage_error)
    }
}
