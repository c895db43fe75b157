//! Task repository: CRUD with the time-window rule and transactional soft delete.

use chrono::Utc;
use momento_core::entities::{DeletedTask, NewTask, Task};
use momento_core::enums::TaskStatus;
use momento_core::errors::CoreError;
use momento_core::responses::TaskDeleted;
use momento_core::time::time_range_is_valid;

use crate::error::DatabaseError;
use crate::helpers::{
    date_to_sql, get_bool, get_opt_string, instant_to_sql, non_blank, parse_datetime, parse_enum,
    parse_optional_date, parse_optional_datetime, parse_optional_time, time_to_sql,
};
use crate::repos::trash::row_to_deleted_task;
use crate::service::MomentoService;
use crate::updates::task::TaskUpdate;

pub(crate) const SELECT_COLS: &str = "id, title, description, status, task_date, start_time, \
     end_time, is_momento_task, momento_start_timestamp, momento_end_timestamp, created_at, updated_at";

/// Scheduled tasks first in chronological order, unscheduled ones after by creation.
const LIST_ORDER: &str = "task_date IS NULL, task_date ASC, start_time IS NULL, start_time ASC, \
     created_at ASC, id ASC";

const INVALID_RANGE: &str = "End time must be after start time";
const MOMENTO_WITHOUT_START: &str = "A momento task needs a start timestamp";
const ACTIVE_MOMENTO_STATUS: &str =
    "An unfinished momento task must stay in progress; finish it to complete it";

pub(crate) fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        task_date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        start_time: parse_optional_time(get_opt_string(row, 5)?.as_deref())?,
        end_time: parse_optional_time(get_opt_string(row, 6)?.as_deref())?,
        is_momento_task: get_bool(row, 7)?,
        momento_start_timestamp: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
        momento_end_timestamp: parse_optional_datetime(get_opt_string(row, 9)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

fn validate_task(task: &Task) -> Result<(), CoreError> {
    if task.title.trim().is_empty() {
        return Err(CoreError::validation("Title is required"));
    }
    if !time_range_is_valid(task.start_time, task.end_time) {
        return Err(CoreError::validation(INVALID_RANGE));
    }
    if task.is_momento_task {
        if task.momento_start_timestamp.is_none() {
            return Err(CoreError::validation(MOMENTO_WITHOUT_START));
        }
        if task.momento_end_timestamp.is_none() && task.status != TaskStatus::InProgress {
            return Err(CoreError::validation(ACTIVE_MOMENTO_STATUS));
        }
    }
    Ok(())
}

const fn status_verb(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "Completed task",
        TaskStatus::Pending => "Marked task as pending",
        TaskStatus::InProgress => "Marked task as in progress",
    }
}

impl MomentoService {
    /// Create a task. Momento tasks start `in_progress` with a start instant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) for a blank title or an end
    /// time not after the start time; nothing is written in that case.
    pub async fn create_task(&self, new: NewTask) -> Result<Task, DatabaseError> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::validation("Title is required").into());
        }
        if !time_range_is_valid(new.start_time, new.end_time) {
            return Err(CoreError::validation(INVALID_RANGE).into());
        }

        let now = Utc::now();
        let (status, momento_start) = if new.is_momento_task {
            (
                TaskStatus::InProgress,
                Some(new.momento_start_timestamp.unwrap_or(now)),
            )
        } else {
            (new.status.unwrap_or_default(), None)
        };

        let id = self
            .db()
            .insert(
                "INSERT INTO tasks (title, description, status, task_date, start_time, end_time,
                    is_momento_task, momento_start_timestamp, momento_end_timestamp,
                    created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL, ?9, ?9)",
                libsql::params![
                    title.as_str(),
                    non_blank(new.description.as_deref()),
                    status.as_str(),
                    date_to_sql(new.task_date),
                    time_to_sql(new.start_time),
                    time_to_sql(new.end_time),
                    i64::from(new.is_momento_task),
                    instant_to_sql(momento_start),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let task = self.get_task(id).await?;

        let description = if task.is_momento_task {
            format!("Started momento task: \"{}\"", task.title)
        } else {
            format!("Created task: \"{}\"", task.title)
        };
        let _ = self.record_activity(&description).await;

        tracing::info!(task_id = task.id, momento = task.is_momento_task, "created task");
        Ok(task)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) when no task has this id.
    pub async fn get_task(&self, id: i64) -> Result<Task, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("Task", id))?;
        row_to_task(&row)
    }

    /// All tasks: by date, then start time (unscheduled last), then creation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks ORDER BY {LIST_ORDER}"),
                (),
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Merge `update` onto the stored task and save it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id and
    /// `CoreError::Validation` when the merged task breaks the time-window
    /// rule, or would leave an unfinished momento task out of `in_progress`.
    pub async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task, DatabaseError> {
        let existing = self.get_task(id).await?;
        let merged = update.merged_onto(&existing);
        validate_task(&merged)?;

        let now = Utc::now();
        self.db()
            .execute(
                "UPDATE tasks SET title = ?1, description = ?2, status = ?3, task_date = ?4,
                    start_time = ?5, end_time = ?6, is_momento_task = ?7,
                    momento_start_timestamp = ?8, momento_end_timestamp = ?9, updated_at = ?10
                 WHERE id = ?11",
                libsql::params![
                    merged.title.as_str(),
                    merged.description.as_deref(),
                    merged.status.as_str(),
                    date_to_sql(merged.task_date),
                    time_to_sql(merged.start_time),
                    time_to_sql(merged.end_time),
                    i64::from(merged.is_momento_task),
                    instant_to_sql(merged.momento_start_timestamp),
                    instant_to_sql(merged.momento_end_timestamp),
                    now.to_rfc3339(),
                    id
                ],
            )
            .await?;

        let updated = self.get_task(id).await?;
        let verb = update
            .status_change(&existing)
            .map_or("Updated task", status_verb);
        let _ = self
            .record_activity(&format!("{verb}: \"{}\"", updated.title))
            .await;

        Ok(updated)
    }

    /// Move a task and its logs to the trash, then remove the live rows.
    ///
    /// Copy and removal run in one transaction; if any step fails nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id, or the store error
    /// that aborted the transaction.
    pub async fn delete_task(&self, id: i64) -> Result<TaskDeleted, DatabaseError> {
        let task = self.get_task(id).await?;
        let now = Utc::now().to_rfc3339();

        let write = self.db().write_lock().await;
        let tx = self.db().conn().transaction().await?;
        let moved = async {
            tx.execute(
                &format!(
                    "INSERT INTO deleted_tasks (original_task_id, title, description, status,
                        task_date, start_time, end_time, is_momento_task,
                        momento_start_timestamp, momento_end_timestamp,
                        created_at, updated_at, deleted_at)
                     SELECT {SELECT_COLS}, ?2 FROM tasks WHERE id = ?1"
                ),
                libsql::params![id, now.as_str()],
            )
            .await?;
            let deleted_id = tx.last_insert_rowid();

            let logs_moved = tx
                .execute(
                    "INSERT INTO deleted_task_logs (deleted_task_id, original_log_id, content, created_at)
                     SELECT ?1, id, content, created_at FROM task_logs WHERE task_id = ?2",
                    libsql::params![deleted_id, id],
                )
                .await?;

            tx.execute("DELETE FROM task_logs WHERE task_id = ?1", [id])
                .await?;
            tx.execute("DELETE FROM tasks WHERE id = ?1", [id]).await?;
            Ok::<_, DatabaseError>((deleted_id, logs_moved))
        }
        .await;

        let (deleted_id, logs_moved) = match moved {
            Ok(ids) => {
                tx.commit().await?;
                ids
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%rollback, task_id = id, "rollback after failed delete");
                }
                return Err(error);
            }
        };
        drop(write);

        let deleted = self.get_deleted_task(deleted_id).await?;
        let _ = self
            .record_activity(&format!("Deleted task: \"{}\"", task.title))
            .await;

        tracing::info!(task_id = id, deleted_id, logs_moved, "moved task to trash");
        Ok(TaskDeleted {
            deleted,
            logs_moved: u32::try_from(logs_moved).unwrap_or(u32::MAX),
        })
    }

    pub(crate) async fn get_deleted_task(&self, id: i64) -> Result<DeletedTask, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM deleted_tasks WHERE id = ?1",
                    crate::repos::trash::DELETED_TASK_COLS
                ),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_deleted_task(&row)
    }
}
