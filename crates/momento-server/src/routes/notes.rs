//! `/notes`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use momento_core::entities::{NewNote, Note};
use momento_db::updates::note::NoteUpdate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.service.list_notes().await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewNote>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.service.create_note(new).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.service.get_note(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<NoteUpdate>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.service.update_note(id, &update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.service.delete_note(id).await?))
}
