//! Promotion row model.

use chrono::{Duration, NaiveDate};
use promo_core::error::CoreError;
use promo_core::promotion::{Promotion, PromotionType};
use promo_core::types::DbId;
use sqlx::FromRow;

/// A row from the `promotions` table.
///
/// `duration` is stored as whole seconds in `duration_secs`.
#[derive(Debug, Clone, FromRow)]
pub struct PromotionRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub promo_code: i64,
    pub promo_type: String,
    pub promo_value: String,
    pub start_date: NaiveDate,
    pub created_date: NaiveDate,
    pub duration_secs: i64,
    pub active: bool,
}

impl TryFrom<PromotionRow> for Promotion {
    type Error = CoreError;

    fn try_from(row: PromotionRow) -> Result<Self, Self::Error> {
        let promo_type = row.promo_type.parse::<PromotionType>().map_err(|_| {
            CoreError::Internal(format!(
                "promotion {} has unknown promo_type '{}'",
                row.id, row.promo_type
            ))
        })?;
        let duration = Duration::try_seconds(row.duration_secs).ok_or_else(|| {
            CoreError::Internal(format!(
                "promotion {} has out-of-range duration_secs {}",
                row.id, row.duration_secs
            ))
        })?;

        Ok(Promotion {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            promo_code: row.promo_code,
            promo_type,
            promo_value: row.promo_value,
            start_date: row.start_date,
            created_date: row.created_date,
            duration,
            active: row.active,
        })
    }
}
