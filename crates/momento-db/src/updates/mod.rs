//! Partial-update payloads for tasks and notes.
//!
//! Updates follow merge semantics: any field that is absent, `null`, or a
//! blank string keeps the stored value. A field therefore cannot be cleared
//! through an update.

pub mod note;
pub mod task;

use momento_core::enums::TaskStatus;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating blank as absent.
pub(crate) fn blank_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Deserialize an optional status, treating blank as absent.
pub(crate) fn lenient_status<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<TaskStatus>, D::Error> {
    blank_as_none(d)?
        .map(|s| s.parse::<TaskStatus>().map_err(D::Error::custom))
        .transpose()
}
