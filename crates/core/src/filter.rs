//! Search filter over promotions.
//!
//! Criteria arrive as raw `field=value` strings (usually a query string).
//! Each one is turned into a typed comparator up front; a record matches
//! when every comparator accepts it. Only a non-numeric `promo_code` is an
//! error. Malformed dates, booleans and enum names simply match nothing.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::promotion::{fields, parse_bool, parse_date, Promotion, PromotionType};

/// One typed search criterion.
///
/// `None` payloads mark a criterion whose raw value could not be parsed;
/// such a criterion never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Title(String),
    Description(String),
    PromoValue(String),
    PromoCode(i64),
    PromoType(Option<PromotionType>),
    Active(Option<bool>),
    StartDate(Option<NaiveDate>),
    CreatedDate(Option<NaiveDate>),
}

impl Criterion {
    /// Build a criterion for `field`, or `Ok(None)` when the field is not searchable.
    pub fn parse(field: &str, raw: &str) -> Result<Option<Self>, ValidationError> {
        let criterion = match field {
            fields::TITLE => Self::Title(raw.to_owned()),
            fields::DESCRIPTION => Self::Description(raw.to_owned()),
            fields::PROMO_VALUE => Self::PromoValue(raw.to_owned()),
            fields::PROMO_CODE => Self::PromoCode(raw.trim().parse().map_err(|_| {
                ValidationError::invalid(fields::PROMO_CODE, format!("'{raw}' is not an integer"))
            })?),
            fields::PROMO_TYPE => {
                Self::PromoType(raw.trim().to_ascii_uppercase().parse().ok())
            }
            fields::ACTIVE => Self::Active(parse_bool(raw)),
            fields::START_DATE => Self::StartDate(parse_date(raw)),
            fields::CREATED_DATE => Self::CreatedDate(parse_date(raw)),
            _ => return Ok(None),
        };
        Ok(Some(criterion))
    }

    pub fn matches(&self, promotion: &Promotion) -> bool {
        match self {
            Self::Title(title) => promotion.title == *title,
            Self::Description(description) => {
                promotion.description.as_deref() == Some(description.as_str())
            }
            Self::PromoValue(value) => promotion.promo_value == *value,
            Self::PromoCode(code) => promotion.promo_code == *code,
            Self::PromoType(promo_type) => *promo_type == Some(promotion.promo_type),
            Self::Active(active) => *active == Some(promotion.active),
            Self::StartDate(date) => *date == Some(promotion.start_date),
            Self::CreatedDate(date) => *date == Some(promotion.created_date),
        }
    }
}

/// A conjunction of criteria. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionFilter {
    criteria: Vec<Criterion>,
}

impl PromotionFilter {
    /// Build a filter from raw `(field, value)` pairs.
    ///
    /// Unknown fields and blank values are skipped.
    pub fn from_criteria<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = Vec::new();
        for (field, raw) in pairs {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            if let Some(criterion) = Criterion::parse(field.as_ref(), raw)? {
                criteria.push(criterion);
            }
        }
        Ok(Self { criteria })
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn matches(&self, promotion: &Promotion) -> bool {
        self.criteria.iter().all(|c| c.matches(promotion))
    }

    /// Keep the matching records, preserving their order.
    pub fn apply(&self, mut promotions: Vec<Promotion>) -> Vec<Promotion> {
        promotions.retain(|p| self.matches(p));
        promotions
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
