use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One line of the human-readable activity feed. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
