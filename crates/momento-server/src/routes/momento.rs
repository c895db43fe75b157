//! `/momento`: start, finish, and log against running momento tasks.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use momento_core::entities::ActiveMomento;
use momento_core::responses::{LogPlacement, MomentoFinished, MomentoStarted};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A task id or a free-text fragment of a running task's title.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Id(i64),
    Text(String),
}

impl Identifier {
    fn into_text(self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FinishBody {
    pub identifier: Identifier,
}

#[derive(Debug, Deserialize)]
pub struct LogBody {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub task_id: Option<i64>,
}

pub async fn active(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActiveMomento>>, ApiError> {
    Ok(Json(state.service.active_momento_tasks().await?))
}

pub async fn start(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<StartBody>,
) -> Result<(StatusCode, Json<MomentoStarted>), ApiError> {
    let started = state
        .service
        .start_momento(&body.title, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(started)))
}

pub async fn finish(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<FinishBody>,
) -> Result<Json<MomentoFinished>, ApiError> {
    let identifier = body.identifier.into_text();
    Ok(Json(state.service.finish_momento(&identifier).await?))
}

pub async fn log(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LogBody>,
) -> Result<(StatusCode, Json<LogPlacement>), ApiError> {
    let placement = state
        .service
        .add_log_smart(body.task_id, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(placement)))
}
