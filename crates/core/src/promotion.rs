//! Promotion record schema, validator and transport (de)serialization.
//!
//! A transport payload is a JSON object (`serde_json::Map`). [`Promotion::deserialize`]
//! coerces each field explicitly and reports the first problem it finds as a
//! [`ValidationError`]; [`Promotion::serialize`] is the inverse and never fails.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde_json::{json, Map, Value};
use validator::Validate;

use crate::error::ValidationError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// Payload keys, shared by the validator and the search filter.
pub mod fields {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const PROMO_CODE: &str = "promo_code";
    pub const PROMO_TYPE: &str = "promo_type";
    pub const PROMO_VALUE: &str = "promo_value";
    pub const START_DATE: &str = "start_date";
    pub const CREATED_DATE: &str = "created_date";
    pub const DURATION: &str = "duration";
    pub const ACTIVE: &str = "active";
}

/// Rendering used for every date leaving the service.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const SECONDS_PER_DAY: i64 = 86_400;

// ---------------------------------------------------------------------------
// Promotion type
// ---------------------------------------------------------------------------

/// The closed set of discount mechanisms a promotion can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionType {
    AmountDiscount,
    PercentageDiscount,
    BuyOneGetOne,
}

impl PromotionType {
    pub const ALL: [PromotionType; 3] = [
        Self::AmountDiscount,
        Self::PercentageDiscount,
        Self::BuyOneGetOne,
    ];

    /// Canonical wire name, e.g. `AMOUNT_DISCOUNT`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AmountDiscount => "AMOUNT_DISCOUNT",
            Self::PercentageDiscount => "PERCENTAGE_DISCOUNT",
            Self::BuyOneGetOne => "BUY_ONE_GET_ONE",
        }
    }
}

impl fmt::Display for PromotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                ValidationError::invalid(
                    fields::PROMO_TYPE,
                    format!("'{s}' is not one of: {}", valid.join(", ")),
                )
            })
    }
}

/// Membership test against the closed set of promotion type names.
///
/// Case-sensitive: only canonical names such as `BUY_ONE_GET_ONE` are members.
pub fn validate_enum(promo_type: &str) -> bool {
    promo_type.parse::<PromotionType>().is_ok()
}

// ---------------------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------------------

/// A marketing discount offer.
///
/// `id` is `None` until the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Promotion {
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 40, message = "must be between 1 and 40 characters"))]
    pub title: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub description: Option<String>,
    pub promo_code: i64,
    pub promo_type: PromotionType,
    #[validate(length(max = 10, message = "must be at most 10 characters"))]
    pub promo_value: String,
    pub start_date: NaiveDate,
    pub created_date: NaiveDate,
    pub duration: Duration,
    pub active: bool,
}

impl Promotion {
    /// Build a promotion from a transport payload.
    ///
    /// Every field except `description` is required; a `null` counts as
    /// absent. Unknown keys, including `id`, are ignored. The returned record
    /// has no id.
    pub fn deserialize(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        let title = coerce_string(fields::TITLE, required(payload, fields::TITLE)?)?;
        let description = match payload.get(fields::DESCRIPTION) {
            None | Some(Value::Null) => None,
            Some(value) => Some(coerce_string(fields::DESCRIPTION, value)?),
        };
        let promo_code =
            coerce_integer(fields::PROMO_CODE, required(payload, fields::PROMO_CODE)?)?;
        let promo_type = coerce_string(fields::PROMO_TYPE, required(payload, fields::PROMO_TYPE)?)?
            .parse::<PromotionType>()?;
        let promo_value =
            coerce_text(fields::PROMO_VALUE, required(payload, fields::PROMO_VALUE)?)?;
        let start_date = coerce_date(fields::START_DATE, required(payload, fields::START_DATE)?)?;
        let created_date =
            coerce_date(fields::CREATED_DATE, required(payload, fields::CREATED_DATE)?)?;
        let duration = coerce_duration(fields::DURATION, required(payload, fields::DURATION)?)?;
        let active = coerce_bool(fields::ACTIVE, required(payload, fields::ACTIVE)?)?;

        let promotion = Self {
            id: None,
            title,
            description,
            promo_code,
            promo_type,
            promo_value,
            start_date,
            created_date,
            duration,
            active,
        };
        promotion.validate().map_err(|errors| first_violation(&errors))?;
        Ok(promotion)
    }

    /// Render the record as a transport mapping.
    pub fn serialize(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(fields::ID.into(), json!(self.id));
        map.insert(fields::TITLE.into(), json!(self.title));
        map.insert(fields::DESCRIPTION.into(), json!(self.description));
        map.insert(fields::PROMO_CODE.into(), json!(self.promo_code));
        map.insert(fields::PROMO_TYPE.into(), json!(self.promo_type.as_str()));
        map.insert(fields::PROMO_VALUE.into(), json!(self.promo_value));
        map.insert(
            fields::START_DATE.into(),
            json!(self.start_date.format(DATE_FORMAT).to_string()),
        );
        map.insert(
            fields::CREATED_DATE.into(),
            json!(self.created_date.format(DATE_FORMAT).to_string()),
        );
        map.insert(fields::DURATION.into(), json!(format_duration(self.duration)));
        map.insert(fields::ACTIVE.into(), json!(self.active));
        map
    }
}

// ---------------------------------------------------------------------------
// Shared parsers
// ---------------------------------------------------------------------------

/// Parse a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp, a naive
/// ISO timestamp or an RFC 2822 display date (`Wed, 01 Jan 2025 00:00:00 GMT`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive()))
}

/// Parse an elapsed-time string: `"N day[s]"`, `"N day[s], H:MM:SS"` or
/// `"H:MM:SS"`. Fractional seconds are accepted and truncated. Negative
/// durations are rejected.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (days, clock) = match raw.split_once(" day") {
        Some((days, rest)) => {
            let days: i64 = days.trim().parse().ok()?;
            let rest = rest.strip_prefix('s').unwrap_or(rest).trim_start();
            let clock = if rest.is_empty() {
                None
            } else {
                Some(rest.strip_prefix(',')?.trim())
            };
            (days, clock)
        }
        None => (0, Some(raw)),
    };
    if days < 0 {
        return None;
    }

    let clock_secs = match clock {
        Some(clock) => parse_clock(clock)?,
        None => 0,
    };
    let total = days.checked_mul(SECONDS_PER_DAY)?.checked_add(clock_secs)?;
    Duration::try_seconds(total)
}

fn parse_clock(clock: &str) -> Option<i64> {
    let mut parts = clock.splitn(3, ':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds = parts.next()?;
    let seconds = match seconds.split_once('.') {
        Some((whole, frac)) if !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()) => {
            whole
        }
        Some(_) => return None,
        None => seconds,
    };
    let seconds: i64 = seconds.parse().ok()?;

    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }
    hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)
}

/// Render a duration the way it is read back: `"15 days, 0:00:00"`,
/// `"1 day, 2:03:04"` or `"0:30:00"` below one day.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let days = total.div_euclid(SECONDS_PER_DAY);
    let rem = total.rem_euclid(SECONDS_PER_DAY);
    let clock = format!("{}:{:02}:{:02}", rem / 3600, rem % 3600 / 60, rem % 60);

    match days {
        0 => clock,
        1 | -1 => format!("{days} day, {clock}"),
        _ => format!("{days} days, {clock}"),
    }
}

/// Case-insensitive `"true"` / `"false"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Per-field coercion
// ---------------------------------------------------------------------------

fn required<'a>(
    payload: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn coerce_string(field: &str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::invalid(field, "must be a string"))
}

/// Free-form text: strings as-is, numbers rendered to their decimal text.
fn coerce_text(field: &str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ValidationError::invalid(field, "must be a string or number")),
    }
}

fn coerce_integer(field: &str, value: &Value) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ValidationError::invalid(field, format!("{n} is not an integer"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid(field, format!("'{s}' is not an integer"))),
        _ => Err(ValidationError::invalid(field, "must be an integer")),
    }
}

fn coerce_date(field: &str, value: &Value) -> Result<NaiveDate, ValidationError> {
    let raw = coerce_string(field, value)?;
    parse_date(&raw)
        .ok_or_else(|| ValidationError::invalid(field, format!("'{raw}' is not a valid date")))
}

fn coerce_duration(field: &str, value: &Value) -> Result<Duration, ValidationError> {
    let raw = coerce_string(field, value)?;
    parse_duration(&raw)
        .ok_or_else(|| ValidationError::invalid(field, format!("'{raw}' is not a valid duration")))
}

pub(crate) fn coerce_bool(field: &str, value: &Value) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => parse_bool(s)
            .ok_or_else(|| ValidationError::invalid(field, format!("'{s}' is not a boolean"))),
        _ => Err(ValidationError::invalid(field, "must be a boolean")),
    }
}

fn first_violation(errors: &validator::ValidationErrors) -> ValidationError {
    match errors.field_errors().into_iter().next() {
        Some((field, violations)) => {
            let reason = violations
                .first()
                .and_then(|v| v.message.as_ref())
                .map_or_else(|| "is out of range".to_string(), |m| m.to_string());
            ValidationError::invalid(field.to_string(), reason)
        }
        None => ValidationError::invalid("promotion", "failed validation"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
