use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;

/// Snapshot of a task taken at deletion time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeletedTask {
    pub id: i64,
    pub original_task_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub task_date: Option<NaiveDate>,
    #[serde(default, with = "crate::time::hhmm")]
    #[schemars(with = "Option<String>")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "crate::time::hhmm")]
    #[schemars(with = "Option<String>")]
    pub end_time: Option<NaiveTime>,
    pub is_momento_task: bool,
    pub momento_start_timestamp: Option<DateTime<Utc>>,
    pub momento_end_timestamp: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: DateTime<Utc>,
}

/// Snapshot of a task log taken when its task was deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeletedTaskLog {
    pub id: i64,
    pub deleted_task_id: i64,
    pub original_log_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
