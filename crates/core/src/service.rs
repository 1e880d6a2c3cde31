//! Promotion operations invoked by the request-handling layer.
//!
//! Each function takes the store explicitly and returns typed records or a
//! [`CoreError`]; rendering and status-code mapping belong to the caller.

use serde_json::{Map, Value};

use crate::error::{CoreError, ValidationError};
use crate::filter::PromotionFilter;
use crate::promotion::{coerce_bool, fields, Promotion};
use crate::store::PromotionStore;
use crate::types::DbId;

/// Entity name used in [`CoreError::NotFound`].
pub const ENTITY: &str = "Promotion";

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

/// Validate `payload` and persist it as a new promotion.
pub async fn create(
    store: &dyn PromotionStore,
    payload: &Map<String, Value>,
) -> Result<Promotion, CoreError> {
    let promotion = Promotion::deserialize(payload)?;
    store.insert(promotion).await
}

pub async fn retrieve(store: &dyn PromotionStore, id: DbId) -> Result<Promotion, CoreError> {
    store.find(id).await?.ok_or_else(|| not_found(id))
}

/// Replace all mutable fields of promotion `id` with `payload`.
///
/// Existence is checked before the payload is validated.
pub async fn update(
    store: &dyn PromotionStore,
    id: DbId,
    payload: &Map<String, Value>,
) -> Result<Promotion, CoreError> {
    retrieve(store, id).await?;
    let promotion = Promotion::deserialize(payload)?;
    store
        .update(id, promotion)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Set only the `active` flag of promotion `id`.
pub async fn set_active(
    store: &dyn PromotionStore,
    id: DbId,
    payload: &Map<String, Value>,
) -> Result<Promotion, CoreError> {
    let mut promotion = retrieve(store, id).await?;
    let active = match payload.get(fields::ACTIVE) {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingField(fields::ACTIVE).into());
        }
        Some(value) => value,
    };
    promotion.active = coerce_bool(fields::ACTIVE, active)?;
    store
        .update(id, promotion)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Remove promotion `id`. Deleting an absent id succeeds.
pub async fn delete(store: &dyn PromotionStore, id: DbId) -> Result<(), CoreError> {
    store.delete(id).await?;
    Ok(())
}

pub async fn list(store: &dyn PromotionStore) -> Result<Vec<Promotion>, CoreError> {
    store.all().await
}

/// Promotions matching every criterion, in storage order.
///
/// Fails only when a `promo_code` criterion is not an integer.
pub async fn search<I, K, V>(
    store: &dyn PromotionStore,
    criteria: I,
) -> Result<Vec<Promotion>, CoreError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let filter = PromotionFilter::from_criteria(criteria)?;
    if filter.is_empty() {
        return store.all().await;
    }
    store.find_by(&filter).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
