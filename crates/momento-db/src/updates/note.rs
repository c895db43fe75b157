//! Note update payload.

use momento_core::entities::Note;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default, deserialize_with = "super::blank_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::blank_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NoteUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Title and content after overlaying this update on `existing`.
    #[must_use]
    pub fn merged_onto(&self, existing: &Note) -> (String, String) {
        let pick = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        (
            pick(&self.title, &existing.title),
            pick(&self.content, &existing.content),
        )
    }
}
