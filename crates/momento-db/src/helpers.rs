//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and accept both RFC 3339
//! and `SQLite`'s `CURRENT_TIMESTAMP` format for instants.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use momento_core::time::{parse_instant, parse_time};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a recognized timestamp.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    parse_instant(s).ok_or_else(|| DatabaseError::Query(format!("Failed to parse datetime '{s}'")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse an optional `YYYY-MM-DD` column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for a malformed stored date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Parse an optional time-of-day column. Stored values are `HH:MM`, but
/// older rows with seconds are accepted.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for a malformed stored time.
pub fn parse_optional_time(s: Option<&str>) -> Result<Option<NaiveTime>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => parse_time(s)
            .map(Some)
            .ok_or_else(|| DatabaseError::Query(format!("Failed to parse time '{s}'"))),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all momento-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER 0/1 column as a bool.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<Option<i64>>(idx)?.unwrap_or(0) != 0)
}

/// Storage form of a date column.
#[must_use]
pub fn date_to_sql(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Storage form of a time-of-day column.
#[must_use]
pub fn time_to_sql(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format("%H:%M").to_string())
}

/// Storage form of an optional instant.
#[must_use]
pub fn instant_to_sql(instant: Option<DateTime<Utc>>) -> Option<String> {
    instant.map(|dt| dt.to_rfc3339())
}

/// Trim text and cap it at `max` characters, appending `...` when cut.
#[must_use]
pub fn preview(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
}

/// Trim an optional string, mapping blank to `None`.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_both_timestamp_formats() {
        let rfc = parse_datetime("2025-07-29T15:55:42+00:00").unwrap();
        let sqlite = parse_datetime("2025-07-29 15:55:42").unwrap();
        assert_eq!(rfc, sqlite);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn blank_optional_columns_are_none() {
        assert_eq!(parse_optional_datetime(Some("")).unwrap(), None);
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_time(Some("")).unwrap(), None);
    }

    #[test]
    fn time_columns_accept_seconds() {
        let parsed = parse_optional_time(Some("18:30:00")).unwrap();
        assert_eq!(time_to_sql(parsed).as_deref(), Some("18:30"));
    }

    #[test]
    fn preview_caps_at_limit() {
        let long = "a".repeat(60);
        let shown = preview(&long, 50);
        assert_eq!(shown.len(), 53);
        assert!(shown.ends_with("..."));
        assert_eq!(preview("  short  ", 50), "short");
        assert_eq!(preview(&"é".repeat(50), 50), "é".repeat(50));
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  hi ")), Some("hi".into()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
