//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"error": "<message>"}` with a status
//! chosen by the kind of failure.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use momento_assistant::AssistantError;
use momento_core::errors::CoreError;
use momento_db::error::DatabaseError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

const fn core_status(error: &CoreError) -> StatusCode {
    match error {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound { .. }
        | CoreError::NoActiveMomento
        | CoreError::MomentoNotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::AmbiguousMomento { .. } => StatusCode::CONFLICT,
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        if let Some(core) = error.as_core() {
            return Self::new(core_status(core), core.to_string());
        }
        tracing::error!(%error, "store failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
    }
}

impl From<AssistantError> for ApiError {
    fn from(error: AssistantError) -> Self {
        let status = match &error {
            AssistantError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AssistantError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AssistantError::Http(_)
            | AssistantError::Api { .. }
            | AssistantError::RateLimited { .. }
            | AssistantError::InvalidResponse(_) => {
                tracing::warn!(%error, "assistant upstream failure");
                StatusCode::BAD_GATEWAY
            }
        };
        Self::new(status, error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::new(error.status(), error.body_text())
    }
}
