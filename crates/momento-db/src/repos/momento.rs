//! Momento lifecycle on top of the task store: start, finish, and routing of
//! untargeted log entries to the active momento task.

use chrono::Utc;
use momento_core::entities::{ActiveMomento, NewTask, Task};
use momento_core::errors::CoreError;
use momento_core::momento::resolve_for_finish;
use momento_core::outcome::BestEffort;
use momento_core::responses::{LogPlacement, MomentoFinished, MomentoStarted};
use momento_core::time::{format_duration, format_instant, whole_minutes_between};

use crate::error::DatabaseError;
use crate::helpers::non_blank;
use crate::repos::task::{SELECT_COLS, row_to_task};
use crate::service::MomentoService;

const NO_TARGET: &str = "No task specified and no active momento task found. \
     Please specify which task to log to or start a momento task first.";

impl MomentoService {
    /// Active momento tasks, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_active_momento_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks
                     WHERE is_momento_task = 1 AND status = 'in_progress'
                       AND momento_end_timestamp IS NULL
                     ORDER BY created_at DESC, id DESC"
                ),
                (),
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    /// Active momento tasks annotated with the time elapsed so far.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn active_momento_tasks(&self) -> Result<Vec<ActiveMomento>, DatabaseError> {
        let now = Utc::now();
        Ok(self
            .list_active_momento_tasks()
            .await?
            .into_iter()
            .map(|task| {
                let elapsed_minutes = task
                    .momento_start_timestamp
                    .map_or(0, |start| whole_minutes_between(start, now));
                ActiveMomento {
                    task,
                    elapsed_minutes,
                    current_duration: format_duration(elapsed_minutes),
                }
            })
            .collect())
    }

    /// Start tracking spontaneous work.
    ///
    /// # Errors
    ///
    /// Returns the task creation error unchanged. The start log is best effort.
    pub async fn start_momento(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<MomentoStarted, DatabaseError> {
        let title = title.trim();
        let description =
            non_blank(description).unwrap_or_else(|| format!("Started working on: {title}"));

        let task = self
            .create_task(NewTask {
                description: Some(description),
                is_momento_task: true,
                ..NewTask::titled(title)
            })
            .await?;

        let started = task.momento_start_timestamp.unwrap_or(task.created_at);
        let content = format!(
            "Started momento task at {}",
            format_instant(started, self.display())
        );
        let start_log = self.best_effort_log(&task, &content).await;

        tracing::info!(task_id = task.id, "started momento task");
        Ok(MomentoStarted { task, start_log })
    }

    /// Finish the active momento task that `identifier` resolves to.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoActiveMomento`, `CoreError::MomentoNotFound`, or
    /// `CoreError::AmbiguousMomento` (wrapped) without mutating anything.
    pub async fn finish_momento(&self, identifier: &str) -> Result<MomentoFinished, DatabaseError> {
        let active = self.list_active_momento_tasks().await?;
        let target = resolve_for_finish(&active, identifier)?;

        let now = Utc::now();
        let changed = self
            .db()
            .execute(
                "UPDATE tasks SET status = 'completed', momento_end_timestamp = ?1, updated_at = ?1
                 WHERE id = ?2 AND is_momento_task = 1 AND momento_end_timestamp IS NULL",
                libsql::params![now.to_rfc3339(), target.id],
            )
            .await?;
        if changed == 0 {
            // Finished by someone else between the read and the write.
            return Err(CoreError::NoActiveMomento.into());
        }

        let task = self.get_task(target.id).await?;
        let start = task.momento_start_timestamp.unwrap_or(task.created_at);
        let end = task.momento_end_timestamp.unwrap_or(now);
        let duration_minutes = whole_minutes_between(start, end);
        let duration = format_duration(duration_minutes);

        let content = format!(
            "Completed momento task at {}. Duration: {duration}",
            format_instant(end, self.display())
        );
        let completion_log = self.best_effort_log(&task, &content).await;
        let _ = self
            .record_activity(&format!(
                "Finished momento task: \"{}\" ({duration})",
                task.title
            ))
            .await;

        tracing::info!(task_id = task.id, duration_minutes, "finished momento task");
        Ok(MomentoFinished {
            task,
            duration_minutes,
            duration,
            completion_log,
        })
    }

    /// Append `content` to the most recently created active momento task.
    /// Returns `None` when no momento task is active.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank content, or a store error.
    pub async fn auto_log_to_active_momento(
        &self,
        content: &str,
    ) -> Result<Option<LogPlacement>, DatabaseError> {
        let Some(task) = self.list_active_momento_tasks().await?.into_iter().next() else {
            return Ok(None);
        };
        let log = self.create_task_log(task.id, content).await?;
        Ok(Some(LogPlacement {
            task,
            log,
            auto_routed: true,
        }))
    }

    /// Log to `task_id` when given, otherwise to the active momento task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when no task is given and none is
    /// active, and the usual log errors otherwise.
    pub async fn add_log_smart(
        &self,
        task_id: Option<i64>,
        content: &str,
    ) -> Result<LogPlacement, DatabaseError> {
        if let Some(task_id) = task_id {
            let log = self.create_task_log(task_id, content).await?;
            let task = self.get_task(task_id).await?;
            return Ok(LogPlacement {
                task,
                log,
                auto_routed: false,
            });
        }

        self.auto_log_to_active_momento(content)
            .await?
            .ok_or_else(|| CoreError::validation(NO_TARGET).into())
    }

    async fn best_effort_log(&self, task: &Task, content: &str) -> BestEffort {
        let result = self.insert_log(task, content).await;
        if let Err(error) = &result {
            tracing::warn!(%error, task_id = task.id, "failed to append momento log");
        }
        BestEffort::from_result(result)
    }
}
