//! Activity feed repository.
//!
//! Append-only, human-readable entries describing every mutation. Writing an
//! entry is best effort: a failure is logged and reported through
//! [`BestEffort`], never propagated.

use chrono::{Days, NaiveDate, Utc};
use momento_core::entities::ActivityLogEntry;
use momento_core::outcome::BestEffort;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::MomentoService;

const SELECT_COLS: &str = "id, timestamp, description, created_at";

/// Filter criteria for activity queries.
#[derive(Debug, Default, Clone)]
pub struct ActivityFilter {
    /// Include entries from 00:00:00 UTC of this day.
    pub start_date: Option<NaiveDate>,
    /// Include entries through the end of this day.
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
}

fn row_to_activity(row: &libsql::Row) -> Result<ActivityLogEntry, DatabaseError> {
    Ok(ActivityLogEntry {
        id: row.get(0)?,
        timestamp: parse_datetime(&row.get::<String>(1)?)?,
        description: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl MomentoService {
    /// Record one activity entry. Never fails the caller.
    pub async fn record_activity(&self, description: &str) -> BestEffort {
        match self.append_activity(description).await {
            Ok(_) => BestEffort::Recorded,
            Err(error) => {
                tracing::warn!(%error, description, "failed to record activity");
                BestEffort::Failed(error.to_string())
            }
        }
    }

    /// Insert an activity entry, surfacing any failure.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_activity(
        &self,
        description: &str,
    ) -> Result<ActivityLogEntry, DatabaseError> {
        let now = Utc::now();
        let id = self
            .db()
            .insert(
                "INSERT INTO activity_log (timestamp, description, created_at) VALUES (?1, ?2, ?3)",
                libsql::params![now.to_rfc3339(), description, now.to_rfc3339()],
            )
            .await?;

        Ok(ActivityLogEntry {
            id,
            timestamp: now,
            description: description.to_string(),
            created_at: now,
        })
    }

    /// Newest entries first, optionally bounded by calendar days.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_activity(
        &self,
        filter: &ActivityFilter,
    ) -> Result<Vec<ActivityLogEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(start) = filter.start_date {
            params.push(libsql::Value::Text(format!("{start}T00:00:00")));
            conditions.push(format!("timestamp >= ?{}", params.len()));
        }
        if let Some(end) = filter.end_date {
            // Exclusive upper bound at the next midnight keeps the whole end day.
            let next = end.checked_add_days(Days::new(1)).unwrap_or(end);
            params.push(libsql::Value::Text(format!("{next}T00:00:00")));
            conditions.push(format!("timestamp < ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter.limit.unwrap_or_else(|| self.default_limit());

        tracing::debug!(?filter, limit, "listing activity");
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM activity_log {where_clause}
                     ORDER BY timestamp DESC, id DESC LIMIT {limit}"
                ),
                libsql::params_from_iter(params),
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_activity(&row)?);
        }
        Ok(entries)
    }
}
