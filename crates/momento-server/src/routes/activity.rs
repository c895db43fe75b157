//! `/trash` and `/activity-log`.

use axum::Json;
use axum::extract::State;
use momento_core::entities::ActivityLogEntry;
use momento_core::responses::TrashEntry;
use momento_core::time::parse_date;
use momento_db::repos::activity::ActivityFilter;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

/// Query string for `/activity-log`. Accepts camelCase and snake_case keys.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    #[serde(default, alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ActivityQuery {
    /// # Errors
    ///
    /// Returns a 400 error when a date is present but unreadable.
    pub fn into_filter(self) -> Result<ActivityFilter, ApiError> {
        Ok(ActivityFilter {
            start_date: optional_date(self.start_date.as_deref(), "startDate")?,
            end_date: optional_date(self.end_date.as_deref(), "endDate")?,
            limit: self.limit,
        })
    }
}

fn optional_date(
    value: Option<&str>,
    field: &str,
) -> Result<Option<chrono::NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid {field}: {raw}"))),
    }
}

pub async fn trash(State(state): State<AppState>) -> Result<Json<Vec<TrashEntry>>, ApiError> {
    Ok(Json(state.service.list_trash().await?))
}

pub async fn activity(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ActivityQuery>,
) -> Result<Json<Vec<ActivityLogEntry>>, ApiError> {
    let filter = query.into_filter()?;
    Ok(Json(state.service.list_activity(&filter).await?))
}
