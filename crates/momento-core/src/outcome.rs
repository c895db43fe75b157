//! Result type for best-effort side effects.
//!
//! Activity entries and momento auto logs must never fail the operation that
//! triggered them. Their outcome is still returned so callers and tests can
//! see what happened; dropping it is fine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum BestEffort {
    Recorded,
    Failed(String),
}

impl BestEffort {
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded)
    }

    pub fn from_result<T, E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Recorded,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}
