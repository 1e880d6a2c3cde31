//! Repository for the `promotions` table.

use promo_core::promotion::Promotion;
use promo_core::types::DbId;
use sqlx::PgPool;

use crate::models::promotion::PromotionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, promo_code, promo_type, promo_value, \
                       start_date, created_date, duration_secs, active";

/// Provides CRUD operations for promotions.
pub struct PromotionRepo;

impl PromotionRepo {
    /// Insert a new promotion, returning the created row. `input.id` is ignored.
    pub async fn create(pool: &PgPool, input: &Promotion) -> Result<PromotionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO promotions
                (title, description, promo_code, promo_type, promo_value,
                 start_date, created_date, duration_secs, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromotionRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.promo_code)
            .bind(input.promo_type.as_str())
            .bind(&input.promo_value)
            .bind(input.start_date)
            .bind(input.created_date)
            .bind(input.duration.num_seconds())
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find a promotion by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PromotionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions WHERE id = $1");
        sqlx::query_as::<_, PromotionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all promotions in insertion (id) order.
    pub async fn list(pool: &PgPool) -> Result<Vec<PromotionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions ORDER BY id");
        sqlx::query_as::<_, PromotionRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of a promotion.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &Promotion,
    ) -> Result<Option<PromotionRow>, sqlx::Error> {
        let query = format!(
            "UPDATE promotions SET
                title = $2,
                description = $3,
                promo_code = $4,
                promo_type = $5,
                promo_value = $6,
                start_date = $7,
                created_date = $8,
                duration_secs = $9,
                active = $10
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromotionRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.promo_code)
            .bind(input.promo_type.as_str())
            .bind(&input.promo_value)
            .bind(input.start_date)
            .bind(input.created_date)
            .bind(input.duration.num_seconds())
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a promotion by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
