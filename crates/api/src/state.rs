use std::sync::Arc;

use promo_core::store::PromotionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Promotion persistence (Postgres or in-memory).
    pub store: Arc<dyn PromotionStore>,
}
