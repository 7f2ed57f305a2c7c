//! Data records for the Kanban domain
//!
//! Records are plain data: they carry no persistence logic. Each entity
//! derives [`validator::Validate`] so callers can check schema constraints
//! explicitly before handing a record to a [`crate::store::Store`].
//!
//! # Models
//!
//! - `user`: Board participants (resolved upstream, read-only here)
//! - `board`: Top-level workspace with owner and members
//! - `list`: Ordered column on a board
//! - `task`: Card inside a list, ranked by `order`
//! - `activity`: Append-only audit entries scoped to a board
//!
//! All records serialize with camelCase field names, which is what the
//! browser client expects on the wire.

pub mod activity;
pub mod board;
pub mod list;
pub mod task;
pub mod user;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

/// Deserializes a present field into `Some`, so that `Option<Option<T>>`
/// can tell an explicit `null` apart from an absent field.
///
/// Use together with `#[serde(default)]`:
///
/// ```
/// use kanban_shared::models::deserialize_some;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Patch {
///     #[serde(default, deserialize_with = "deserialize_some")]
///     note: Option<Option<String>>,
/// }
///
/// let absent: Patch = serde_json::from_str("{}").unwrap();
/// assert_eq!(absent.note, None);
///
/// let cleared: Patch = serde_json::from_str(r#"{"note": null}"#).unwrap();
/// assert_eq!(cleared.note, Some(None));
/// ```
pub fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Parses a due date given either as an RFC 3339 timestamp or as a bare
/// `YYYY-MM-DD` date, which is taken as midnight UTC
///
/// ```
/// use kanban_shared::models::parse_due_date;
///
/// let day = parse_due_date("2025-05-20").unwrap();
/// assert_eq!(day.to_rfc3339(), "2025-05-20T00:00:00+00:00");
/// assert!(parse_due_date("20/05/2025").is_err());
/// ```
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = raw.parse::<DateTime<Utc>>() {
        return Ok(timestamp);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| format!("invalid due date '{}', expected RFC 3339 or YYYY-MM-DD", raw))
}

/// Deserializes an optional due date through [`parse_due_date`]
pub fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_due_date(&raw).map_err(de::Error::custom))
        .transpose()
}

/// [`deserialize_due_date`] for patch fields, where `null` clears the date
pub fn deserialize_some_due_date<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_due_date(deserializer).map(Some)
}
