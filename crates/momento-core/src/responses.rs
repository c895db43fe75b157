//! Response shapes returned as JSON by the HTTP surface and the `momento` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{DeletedTask, DeletedTaskLog, Task, TaskLog};
use crate::outcome::BestEffort;

/// A trashed task together with its trashed logs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrashEntry {
    #[serde(flatten)]
    pub task: DeletedTask,
    pub logs: Vec<DeletedTaskLog>,
}

/// Result of starting a momento task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MomentoStarted {
    pub task: Task,
    pub start_log: BestEffort,
}

/// Result of finishing a momento task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MomentoFinished {
    pub task: Task,
    pub duration_minutes: i64,
    pub duration: String,
    pub completion_log: BestEffort,
}

/// Where a log entry ended up when the caller did not name a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LogPlacement {
    pub task: Task,
    pub log: TaskLog,
    /// True when the task was chosen by routing to the active momento task.
    pub auto_routed: bool,
}

/// Response for task deletion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskDeleted {
    pub deleted: DeletedTask,
    pub logs_moved: u32,
}
