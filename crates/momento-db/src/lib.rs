//! # momento-db
//!
//! libSQL storage for Momento: tasks and their logs, notes, the activity
//! feed, and the trash. Validation and activity logging live alongside the
//! queries so every caller (HTTP, CLI, assistant) goes through the same rules.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) with a single long-lived
//! connection constructed at process start and handed to [`service::MomentoService`].
//! Writes on that connection are serialized by [`MomentoDb::write_lock`]; reads
//! go straight to [`MomentoDb::conn`].

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;
use libsql::params::IntoParams;
use tokio::sync::{Mutex, MutexGuard};

/// Central database handle.
///
/// Wraps a libSQL database and its one connection. Every statement that
/// writes holds `write` so that an open transaction never picks up another
/// caller's statements.
pub struct MomentoDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    write: Mutex<()>,
}

impl MomentoDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let momento_db = Self {
            db,
            conn,
            write: Mutex::new(()),
        };
        momento_db.run_migrations().await?;
        Ok(momento_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Exclusive write access for a multi-statement sequence such as a
    /// transaction. Do not call [`Self::execute`] or [`Self::insert`] while
    /// holding the guard.
    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.write.lock().await
    }

    /// Run one writing statement, returning the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        let _write = self.write.lock().await;
        Ok(self.conn.execute(sql, params).await?)
    }

    /// Run one INSERT and return the new row id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn insert(&self, sql: &str, params: impl IntoParams) -> Result<i64, DatabaseError> {
        let _write = self.write.lock().await;
        self.conn.execute(sql, params).await?;
        Ok(self.conn.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> MomentoDb {
        MomentoDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "tasks",
            "task_logs",
            "notes",
            "activity_log",
            "deleted_tasks",
            "deleted_task_logs",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_enabled() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn status_check_constraint_rejects_unknown_status() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO tasks (title, status, created_at, updated_at) VALUES ('x', 'done', 'now', 'now')",
                (),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn insert_returns_the_new_row_id() {
        let db = test_db().await;
        let sql = "INSERT INTO notes (title, content, created_at, updated_at) VALUES ('a', 'b', 'now', 'now')";
        let first = db.insert(sql, ()).await.unwrap();
        let second = db.insert(sql, ()).await.unwrap();
        assert_eq!(second, first + 1);
        assert_eq!(db.execute("DELETE FROM notes", ()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn file_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("momento.db");
        let path = path.to_str().unwrap();

        {
            let db = MomentoDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO notes (title, content, created_at, updated_at) VALUES ('a', 'b', 'now', 'now')",
                    (),
                )
                .await
                .unwrap();
        }

        let db = MomentoDb::open_local(path).await.unwrap();
        let mut rows = db.conn().query("SELECT COUNT(*) FROM notes", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }
}
