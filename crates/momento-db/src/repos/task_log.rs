//! Task log repository.
//!
//! Logs belong to exactly one task. Every lookup is scoped by the owning
//! task id so a log can never be edited through another task.

use chrono::Utc;
use momento_core::entities::{Task, TaskLog};
use momento_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, preview};
use crate::service::MomentoService;

const SELECT_COLS: &str = "id, task_id, content, created_at";

const PREVIEW_CHARS: usize = 50;

fn row_to_log(row: &libsql::Row) -> Result<TaskLog, DatabaseError> {
    Ok(TaskLog {
        id: row.get(0)?,
        task_id: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn required_content(content: &str) -> Result<&str, CoreError> {
    let content = content.trim();
    if content.is_empty() {
        Err(CoreError::validation("Content is required"))
    } else {
        Ok(content)
    }
}

impl MomentoService {
    /// Logs of a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) when the task does not exist.
    pub async fn list_task_logs(&self, task_id: i64) -> Result<Vec<TaskLog>, DatabaseError> {
        self.get_task(task_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM task_logs WHERE task_id = ?1
                     ORDER BY created_at DESC, id DESC"
                ),
                [task_id],
            )
            .await?;

        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(row_to_log(&row)?);
        }
        Ok(logs)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` unless the log exists and belongs to the task.
    pub async fn get_task_log(&self, task_id: i64, log_id: i64) -> Result<TaskLog, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM task_logs WHERE id = ?1 AND task_id = ?2"),
                [log_id, task_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("Log entry", log_id))?;
        row_to_log(&row)
    }

    /// Append a log to a task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank content and
    /// `CoreError::NotFound` for an unknown task.
    pub async fn create_task_log(
        &self,
        task_id: i64,
        content: &str,
    ) -> Result<TaskLog, DatabaseError> {
        let content = required_content(content)?;
        let task = self.get_task(task_id).await?;
        let log = self.insert_log(&task, content).await?;

        let _ = self
            .record_activity(&format!(
                "Added log to task \"{}\": \"{}\"",
                task.title,
                preview(content, PREVIEW_CHARS)
            ))
            .await;
        Ok(log)
    }

    /// Insert without an activity entry. Used for momento auto logs, whose
    /// start/finish activity entry already describes them.
    pub(crate) async fn insert_log(
        &self,
        task: &Task,
        content: &str,
    ) -> Result<TaskLog, DatabaseError> {
        let now = Utc::now();
        let id = self
            .db()
            .insert(
                "INSERT INTO task_logs (task_id, content, created_at) VALUES (?1, ?2, ?3)",
                libsql::params![task.id, content, now.to_rfc3339()],
            )
            .await?;
        Ok(TaskLog {
            id,
            task_id: task.id,
            content: content.to_string(),
            created_at: now,
        })
    }

    /// Replace a log's content. `created_at` moves to now, marking the edit.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank content and
    /// `CoreError::NotFound` when the task or log is unknown.
    pub async fn update_task_log(
        &self,
        task_id: i64,
        log_id: i64,
        content: &str,
    ) -> Result<TaskLog, DatabaseError> {
        let content = required_content(content)?;
        let task = self.get_task(task_id).await?;
        self.get_task_log(task_id, log_id).await?;

        let now = Utc::now();
        self.db()
            .execute(
                "UPDATE task_logs SET content = ?1, created_at = ?2 WHERE id = ?3 AND task_id = ?4",
                libsql::params![content, now.to_rfc3339(), log_id, task_id],
            )
            .await?;

        let _ = self
            .record_activity(&format!(
                "Updated log on task \"{}\": \"{}\"",
                task.title,
                preview(content, PREVIEW_CHARS)
            ))
            .await;
        self.get_task_log(task_id, log_id).await
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the task or log is unknown.
    pub async fn delete_task_log(
        &self,
        task_id: i64,
        log_id: i64,
    ) -> Result<TaskLog, DatabaseError> {
        let task = self.get_task(task_id).await?;
        let log = self.get_task_log(task_id, log_id).await?;

        self.db()
            .execute(
                "DELETE FROM task_logs WHERE id = ?1 AND task_id = ?2",
                [log_id, task_id],
            )
            .await?;

        let _ = self
            .record_activity(&format!(
                "Deleted log from task \"{}\": \"{}\"",
                task.title,
                preview(&log.content, PREVIEW_CHARS)
            ))
            .await;
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{activity_count, make_task, test_service};
    use crate::repos::activity::ActivityFilter;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_trims_and_lists_newest_first() {
        let svc = test_service().await;
        let task = make_task(&svc, "Report").await;

        let first = svc.create_task_log(task.id, "  outline  ").await.unwrap();
        let second = svc.create_task_log(task.id, "draft").await.unwrap();
        assert_eq!(first.content, "outline");

        let logs = svc.list_task_logs(task.id).await.unwrap();
        let ids: Vec<i64> = logs.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn blank_content_is_rejected_without_writing() {
        let svc = test_service().await;
        let task = make_task(&svc, "Report").await;
        let before = activity_count(&svc).await;

        let err = svc.create_task_log(task.id, "   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Content is required");
        assert!(svc.list_task_logs(task.id).await.unwrap().is_empty());
        assert_eq!(activity_count(&svc).await, before);
    }

    #[tokio::test]
    async fn logs_of_missing_task_are_not_found() {
        let svc = test_service().await;
        let err = svc.list_task_logs(404).await.unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_replaces_content_and_refreshes_timestamp() {
        let svc = test_service().await;
        let task = make_task(&svc, "Report").await;
        let log = svc.create_task_log(task.id, "v1").await.unwrap();

        let edited = svc.update_task_log(task.id, log.id, "v2").await.unwrap();
        assert_eq!(edited.content, "v2");
        assert!(edited.created_at >= log.created_at);
    }

    #[tokio::test]
    async fn log_must_belong_to_task() {
        let svc = test_service().await;
        let a = make_task(&svc, "A").await;
        let b = make_task(&svc, "B").await;
        let log = svc.create_task_log(a.id, "on A").await.unwrap();

        let err = svc.update_task_log(b.id, log.id, "hijack").await.unwrap_err();
        assert_eq!(err.to_string(), format!("Log entry not found: {}", log.id));
        assert!(svc.delete_task_log(b.id, log.id).await.is_err());
        assert_eq!(svc.get_task_log(a.id, log.id).await.unwrap().content, "on A");
    }

    #[tokio::test]
    async fn delete_removes_log() {
        let svc = test_service().await;
        let task = make_task(&svc, "Report").await;
        let log = svc.create_task_log(task.id, "gone soon").await.unwrap();

        svc.delete_task_log(task.id, log.id).await.unwrap();
        assert!(svc.list_task_logs(task.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn activity_preview_is_capped() {
        let svc = test_service().await;
        let task = make_task(&svc, "Report").await;
        let long = "x".repeat(80);
        svc.create_task_log(task.id, &long).await.unwrap();

        let latest = svc.list_activity(&ActivityFilter::default()).await.unwrap();
        let expected = format!("Added log to task \"Report\": \"{}...\"", "x".repeat(50));
        assert_eq!(latest[0].description, expected);
    }
}
