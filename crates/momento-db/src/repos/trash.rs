//! Trash: read side of the soft-delete tables.
//!
//! Rows land here from [`MomentoService::delete_task`]. Nothing in the trash is
//! ever restored or purged.

use momento_core::entities::{DeletedTask, DeletedTaskLog};
use momento_core::responses::TrashEntry;

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, parse_datetime, parse_enum, parse_optional_date,
    parse_optional_datetime, parse_optional_time,
};
use crate::service::MomentoService;

pub(crate) const DELETED_TASK_COLS: &str = "id, original_task_id, title, description, status, \
     task_date, start_time, end_time, is_momento_task, momento_start_timestamp, \
     momento_end_timestamp, created_at, updated_at, deleted_at";

const DELETED_LOG_COLS: &str = "id, deleted_task_id, original_log_id, content, created_at";

pub(crate) fn row_to_deleted_task(row: &libsql::Row) -> Result<DeletedTask, DatabaseError> {
    Ok(DeletedTask {
        id: row.get(0)?,
        original_task_id: row.get(1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        task_date: parse_optional_date(get_opt_string(row, 5)?.as_deref())?,
        start_time: parse_optional_time(get_opt_string(row, 6)?.as_deref())?,
        end_time: parse_optional_time(get_opt_string(row, 7)?.as_deref())?,
        is_momento_task: get_bool(row, 8)?,
        momento_start_timestamp: parse_optional_datetime(get_opt_string(row, 9)?.as_deref())?,
        momento_end_timestamp: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
        deleted_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

fn row_to_deleted_log(row: &libsql::Row) -> Result<DeletedTaskLog, DatabaseError> {
    Ok(DeletedTaskLog {
        id: row.get(0)?,
        deleted_task_id: row.get(1)?,
        original_log_id: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl MomentoService {
    /// Trashed tasks, most recently deleted first, each with its logs.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn list_trash(&self) -> Result<Vec<TrashEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DELETED_TASK_COLS} FROM deleted_tasks ORDER BY deleted_at DESC, id DESC"
                ),
                (),
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_deleted_task(&row)?);
        }

        let mut entries = Vec::with_capacity(tasks.len());
        for task in tasks {
            let logs = self.deleted_logs(task.id).await?;
            entries.push(TrashEntry { task, logs });
        }
        Ok(entries)
    }

    async fn deleted_logs(&self, deleted_task_id: i64) -> Result<Vec<DeletedTaskLog>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DELETED_LOG_COLS} FROM deleted_task_logs WHERE deleted_task_id = ?1
                     ORDER BY created_at DESC, id DESC"
                ),
                [deleted_task_id],
            )
            .await?;

        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            logs.push(row_to_deleted_log(&row)?);
        }
        Ok(logs)
    }

    /// Ids present both live and in the trash. A non-empty result means an
    /// earlier delete copied a task without removing it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn trash_conflicts(&self) -> Result<Vec<i64>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT t.id FROM tasks t
                 JOIN deleted_tasks d ON d.original_task_id = t.id
                 ORDER BY t.id",
                (),
            )
            .await?;

        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<i64>(0)?);
        }
        for task_id in &ids {
            tracing::warn!(task_id, "task present both live and in trash");
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{count_rows, make_task, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn empty_trash() {
        let svc = test_service().await;
        assert!(svc.list_trash().await.unwrap().is_empty());
        assert!(svc.trash_conflicts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_newest_deletion_first_with_logs() {
        let svc = test_service().await;
        let first = make_task(&svc, "First").await;
        let second = make_task(&svc, "Second").await;
        svc.create_task_log(second.id, "older").await.unwrap();
        svc.create_task_log(second.id, "newer").await.unwrap();

        svc.delete_task(first.id).await.unwrap();
        svc.delete_task(second.id).await.unwrap();

        let trash = svc.list_trash().await.unwrap();
        let titles: Vec<_> = trash.iter().map(|e| e.task.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);

        let contents: Vec<_> = trash[0].logs.iter().map(|l| l.content.as_str()).collect();
        assert_eq!(contents, vec!["newer", "older"]);
        assert!(trash[1].logs.is_empty());
        assert_eq!(trash[0].task.original_task_id, second.id);
    }

    #[tokio::test]
    async fn detects_rows_left_in_both_places() {
        let svc = test_service().await;
        let task = make_task(&svc, "Half deleted").await;
        svc.db()
            .conn()
            .execute(
                "INSERT INTO deleted_tasks (original_task_id, title, status, created_at, updated_at, deleted_at)
                 VALUES (?1, 'Half deleted', 'pending', '2025-01-01T00:00:00+00:00',
                         '2025-01-01T00:00:00+00:00', '2025-01-02T00:00:00+00:00')",
                [task.id],
            )
            .await
            .unwrap();

        assert_eq!(svc.trash_conflicts().await.unwrap(), vec![task.id]);
        assert_eq!(count_rows(&svc, "deleted_tasks").await, 1);
    }
}
