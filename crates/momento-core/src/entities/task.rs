use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;

/// A unit of work, either scheduled (date and time window) or a momento task
/// tracked by start and finish instants.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
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
}

impl Task {
    /// A momento task that has been started and not yet finished.
    #[must_use]
    pub fn is_active_momento(&self) -> bool {
        self.is_momento_task
            && self.status == TaskStatus::InProgress
            && self.momento_end_timestamp.is_none()
    }
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default, with = "crate::time::ymd")]
    #[schemars(with = "Option<String>")]
    pub task_date: Option<NaiveDate>,
    #[serde(default, with = "crate::time::hhmm")]
    #[schemars(with = "Option<String>")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "crate::time::hhmm")]
    #[schemars(with = "Option<String>")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_momento_task: bool,
    #[serde(default)]
    pub momento_start_timestamp: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// An active momento task with its elapsed time computed at read time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActiveMomento {
    #[serde(flatten)]
    pub task: Task,
    pub elapsed_minutes: i64,
    pub current_duration: String,
}
