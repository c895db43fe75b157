//! Note repository.

use chrono::Utc;
use momento_core::entities::{NewNote, Note};
use momento_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, preview};
use crate::service::MomentoService;
use crate::updates::note::NoteUpdate;

const SELECT_COLS: &str = "id, title, content, created_at, updated_at";

const TITLE_PREVIEW_CHARS: usize = 50;

fn row_to_note(row: &libsql::Row) -> Result<Note, DatabaseError> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn require_title_and_content(title: &str, content: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(CoreError::validation("Title and content are required"));
    }
    Ok(())
}

impl MomentoService {
    /// Notes, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_notes(&self) -> Result<Vec<Note>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM notes ORDER BY updated_at DESC, id DESC"),
                (),
            )
            .await?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().await? {
            notes.push(row_to_note(&row)?);
        }
        Ok(notes)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) when no note has this id.
    pub async fn get_note(&self, id: i64) -> Result<Note, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM notes WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("Note", id))?;
        row_to_note(&row)
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` when title or content is blank.
    pub async fn create_note(&self, new: NewNote) -> Result<Note, DatabaseError> {
        require_title_and_content(&new.title, &new.content)?;

        let now = Utc::now().to_rfc3339();
        let id = self
            .db()
            .insert(
                "INSERT INTO notes (title, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                libsql::params![new.title.trim(), new.content.trim(), now],
            )
            .await?;
        let note = self.get_note(id).await?;

        let _ = self
            .record_activity(&format!(
                "Created note: \"{}\"",
                preview(&note.title, TITLE_PREVIEW_CHARS)
            ))
            .await;
        Ok(note)
    }

    /// Apply the fields present in `update`; the rest keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id and
    /// `CoreError::Validation` when the merged note would be blank.
    pub async fn update_note(&self, id: i64, update: &NoteUpdate) -> Result<Note, DatabaseError> {
        let existing = self.get_note(id).await?;
        let (title, content) = update.merged_onto(&existing);
        require_title_and_content(&title, &content)?;

        self.db()
            .execute(
                "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params![title.trim(), content.trim(), Utc::now().to_rfc3339(), id],
            )
            .await?;
        let note = self.get_note(id).await?;

        let _ = self
            .record_activity(&format!(
                "Updated note: \"{}\"",
                preview(&note.title, TITLE_PREVIEW_CHARS)
            ))
            .await;
        Ok(note)
    }

    /// Hard delete. Notes have no trash.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id.
    pub async fn delete_note(&self, id: i64) -> Result<Note, DatabaseError> {
        let note = self.get_note(id).await?;
        self.db()
            .execute("DELETE FROM notes WHERE id = ?1", [id])
            .await?;

        let _ = self
            .record_activity(&format!(
                "Deleted note: \"{}\"",
                preview(&note.title, TITLE_PREVIEW_CHARS)
            ))
            .await;
        Ok(note)
    }
}
