//! `/tasks` and `/tasks/{id}/logs`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use momento_core::entities::{NewTask, Task, TaskLog};
use momento_core::responses::TaskDeleted;
use momento_db::updates::task::TaskUpdate;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LogBody {
    #[serde(default)]
    pub content: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.service.list_tasks().await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.service.create_task(new).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.service.get_task(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<TaskUpdate>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.service.update_task(id, &update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TaskDeleted>, ApiError> {
    Ok(Json(state.service.delete_task(id).await?))
}

pub async fn list_logs(
    State(state): State<AppState>,
    ApiPath(task_id): ApiPath<i64>,
) -> Result<Json<Vec<TaskLog>>, ApiError> {
    Ok(Json(state.service.list_task_logs(task_id).await?))
}

pub async fn create_log(
    State(state): State<AppState>,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(body): ApiJson<LogBody>,
) -> Result<(StatusCode, Json<TaskLog>), ApiError> {
    let log = state.service.create_task_log(task_id, &body.content).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn update_log(
    State(state): State<AppState>,
    ApiPath((task_id, log_id)): ApiPath<(i64, i64)>,
    ApiJson(body): ApiJson<LogBody>,
) -> Result<Json<TaskLog>, ApiError> {
    let log = state
        .service
        .update_task_log(task_id, log_id, &body.content)
        .await?;
    Ok(Json(log))
}

pub async fn delete_log(
    State(state): State<AppState>,
    ApiPath((task_id, log_id)): ApiPath<(i64, i64)>,
) -> Result<Json<TaskLog>, ApiError> {
    Ok(Json(state.service.delete_task_log(task_id, log_id).await?))
}
