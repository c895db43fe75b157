//! Route table.

pub mod activity;
pub mod assistant;
pub mod momento;
pub mod notes;
pub mod tasks;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_bearer;
use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let permissive_cors = state.permissive_cors;

    let app = Router::new()
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/tasks/{id}",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
        .route(
            "/tasks/{id}/logs",
            get(tasks::list_logs).post(tasks::create_log),
        )
        .route(
            "/tasks/{id}/logs/{log_id}",
            put(tasks::update_log).delete(tasks::delete_log),
        )
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/{id}",
            get(notes::get).put(notes::update).delete(notes::delete),
        )
        .route("/trash", get(activity::trash))
        .route("/activity-log", get(activity::activity))
        .route("/momento/active", get(momento::active))
        .route("/momento/start", post(momento::start))
        .route("/momento/finish", post(momento::finish))
        .route("/momento/log", post(momento::log))
        .route("/assistant/chat", post(assistant::chat))
        .route("/assistant/parse-task", post(assistant::parse_task))
        .route(
            "/assistant/audio-note",
            post(assistant::audio_note).layer(DefaultBodyLimit::max(assistant::AUDIO_BODY_LIMIT)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if permissive_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
