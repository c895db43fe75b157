//! Task update payload and builder.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use momento_core::entities::Task;
use momento_core::enums::TaskStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, deserialize_with = "super::blank_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::blank_as_none")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_status")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, with = "momento_core::time::ymd")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_date: Option<NaiveDate>,
    #[serde(default, with = "momento_core::time::hhmm")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "momento_core::time::hhmm")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_momento_task: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momento_start_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momento_end_timestamp: Option<DateTime<Utc>>,
}

impl TaskUpdate {
    /// Overlay the supplied fields on `existing`. Timestamps managed by the
    /// store (`created_at`, `updated_at`) are left untouched.
    #[must_use]
    pub fn merged_onto(&self, existing: &Task) -> Task {
        let mut merged = existing.clone();
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            merged.title = title.to_string();
        }
        if let Some(description) = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            merged.description = Some(description.to_string());
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        merged.task_date = self.task_date.or(existing.task_date);
        merged.start_time = self.start_time.or(existing.start_time);
        merged.end_time = self.end_time.or(existing.end_time);
        if let Some(flag) = self.is_momento_task {
            merged.is_momento_task = flag;
        }
        merged.momento_start_timestamp = self
            .momento_start_timestamp
            .or(existing.momento_start_timestamp);
        merged.momento_end_timestamp = self
            .momento_end_timestamp
            .or(existing.momento_end_timestamp);
        merged
    }

    /// Status the merged task moves to, when it differs from `existing`.
    #[must_use]
    pub fn status_change(&self, existing: &Task) -> Option<TaskStatus> {
        self.status.filter(|status| *status != existing.status)
    }
}

pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn task_date(mut self, date: NaiveDate) -> Self {
        self.0.task_date = Some(date);
        self
    }

    #[must_use]
    pub const fn start_time(mut self, time: NaiveTime) -> Self {
        self.0.start_time = Some(time);
        self
    }

    #[must_use]
    pub const fn end_time(mut self, time: NaiveTime) -> Self {
        self.0.end_time = Some(time);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

impl Default for TaskUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
