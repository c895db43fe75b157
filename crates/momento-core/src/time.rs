//! Time normalization between human input, storage, and display.
//!
//! Storage is always canonical: absolute instants are RFC 3339 UTC strings,
//! calendar dates are `YYYY-MM-DD`, times of day are 24-hour `HH:MM`.
//! Localization happens only at the display boundary through
//! [`DisplayOptions`]. None of the parsing functions panic; unparseable input
//! yields `None` (or `false` for range validation).

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Timelike, Utc};
use regex::Regex;

/// Offset of the default display zone (Asia/Kolkata, UTC+05:30) in minutes.
pub const DEFAULT_DISPLAY_OFFSET_MINUTES: i32 = 330;

/// Anchor day used when comparing two times of day.
const ANCHOR_DATE: &str = "2000-01-01";

static CLOCK_24H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid regex"));

static CLOCK_12H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?:[:.](\d{2}))?(?::(\d{2}))?\s*([ap])\.?\s*m?\.?$").expect("valid regex")
});

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// ---------------------------------------------------------------------------
// Current instant
// ---------------------------------------------------------------------------

/// Current instant as an RFC 3339 UTC string.
#[must_use]
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Current UTC calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn current_date() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an absolute timestamp. Accepts RFC 3339 and the naive
/// `YYYY-MM-DD HH:MM:SS` form (read as UTC).
#[must_use]
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date written in any of the common formats.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| parse_instant(input).map(|dt| dt.date_naive()))
}

/// Normalize a date to `YYYY-MM-DD`, or `None` when unparseable.
#[must_use]
pub fn parse_to_date(input: &str) -> Option<String> {
    parse_date(input).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Parse a time of day such as `"6pm"`, `"18:00"` or `"6:30 PM"`.
///
/// A direct `H:MM` match is tried first; everything else goes through the
/// general grammar (12-hour clock, seconds, full timestamps).
#[must_use]
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(caps) = CLOCK_24H.captures(&normalized) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if hour <= 23 && minute <= 59 {
            return NaiveTime::from_hms_opt(hour, minute, 0);
        }
    }

    parse_time_general(&normalized, input.trim())
}

fn parse_time_general(input: &str, original: &str) -> Option<NaiveTime> {
    match input {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    if let Some(caps) = CLOCK_12H.captures(input) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }
        let hour = match (&caps[4], hour) {
            ("a", 12) => 0,
            ("a", h) => h,
            ("p", 12) => 12,
            (_, h) => h + 12,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    let anchored = format!("{ANCHOR_DATE} {input}");
    parse_instant(&anchored)
        .or_else(|| parse_instant(original))
        .and_then(|dt| NaiveTime::from_hms_opt(dt.hour(), dt.minute(), 0))
}

/// Normalize a time of day to 24-hour `HH:MM`, or `None` when unparseable.
#[must_use]
pub fn parse_to_time(input: &str) -> Option<String> {
    parse_time(input).map(|t| t.format("%H:%M").to_string())
}

// ---------------------------------------------------------------------------
// Range validation
// ---------------------------------------------------------------------------

/// Check that `end` is strictly after `start` on the same day.
///
/// Partial ranges (either side absent) are valid. Stored values may omit
/// seconds; `HH:MM` is widened to `HH:MM:00` before comparison. Malformed
/// input is reported as an invalid range.
#[must_use]
pub fn validate_time_range(start: Option<&str>, end: Option<&str>) -> bool {
    let (Some(start), Some(end)) = (start, end) else {
        return true;
    };
    match (anchored_time(start), anchored_time(end)) {
        (Some(start), Some(end)) => end > start,
        _ => false,
    }
}

/// Typed counterpart of [`validate_time_range`].
#[must_use]
pub fn time_range_is_valid(start: Option<NaiveTime>, end: Option<NaiveTime>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => end > start,
        _ => true,
    }
}

fn anchored_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let with_seconds = if value.split(':').count() == 2 {
        format!("{value}:00")
    } else {
        value.to_string()
    };
    NaiveDateTime::parse_from_str(&format!("{ANCHOR_DATE} {with_seconds}"), "%Y-%m-%d %H:%M:%S")
        .ok()
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// How a stored instant is rendered for people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub offset: FixedOffset,
    pub include_date: bool,
    pub include_time: bool,
    pub include_seconds: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            offset: display_offset(DEFAULT_DISPLAY_OFFSET_MINUTES),
            include_date: true,
            include_time: true,
            include_seconds: false,
        }
    }
}

impl DisplayOptions {
    #[must_use]
    pub fn with_offset_minutes(mut self, minutes: i32) -> Self {
        self.offset = display_offset(minutes);
        self
    }

    #[must_use]
    pub const fn time_only(mut self) -> Self {
        self.include_date = false;
        self.include_time = true;
        self
    }

    #[must_use]
    pub const fn with_seconds(mut self, include_seconds: bool) -> Self {
        self.include_seconds = include_seconds;
        self
    }
}

/// Build a display offset from minutes east of UTC, falling back to the
/// default zone when out of range.
#[must_use]
pub fn display_offset(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .or_else(|| FixedOffset::east_opt(DEFAULT_DISPLAY_OFFSET_MINUTES * 60))
        .unwrap_or_else(|| Utc.fix())
}

/// Render a stored timestamp string. Returns the input unchanged when it
/// cannot be parsed.
#[must_use]
pub fn format_for_display(timestamp: &str, options: &DisplayOptions) -> String {
    parse_instant(timestamp).map_or_else(
        || timestamp.to_string(),
        |instant| format_instant(instant, options),
    )
}

/// Render an instant in the configured display zone, e.g. `29 Jul 2025, 9:25 pm`.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>, options: &DisplayOptions) -> String {
    let local = instant.with_timezone(&options.offset);
    let (include_date, include_time) = match (options.include_date, options.include_time) {
        (false, false) => (true, true),
        flags => flags,
    };

    let time_fmt = if options.include_seconds {
        "%-I:%M:%S %P"
    } else {
        "%-I:%M %P"
    };

    let mut parts = Vec::with_capacity(2);
    if include_date {
        parts.push(local.format("%-d %b %Y").to_string());
    }
    if include_time {
        parts.push(local.format(time_fmt).to_string());
    }
    parts.join(", ")
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// Whole minutes elapsed between two instants, never negative.
#[must_use]
pub fn whole_minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes().max(0)
}

/// Render minutes as `{h}h {m}m` from one hour upward, otherwise `{m}m`.
#[must_use]
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}

// ---------------------------------------------------------------------------
// Serde adapters
// ---------------------------------------------------------------------------

/// Serde adapter storing an optional time of day as `HH:MM`.
///
/// Deserialization accepts anything [`parse_time`] accepts; blank strings
/// read as `None`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => s.serialize_some(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_time(s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid time of day: {s}"))),
        }
    }
}

/// Serde adapter for an optional calendar date that accepts any format
/// [`parse_date`] understands and writes `YYYY-MM-DD`.
pub mod ymd {
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_date(s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {s}"))),
        }
    }
}
