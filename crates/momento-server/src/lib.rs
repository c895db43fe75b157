//! # momento-server
//!
//! JSON over HTTP for tasks, task logs, notes, the trash, the activity feed,
//! momento tracking, and the assistant. Handlers are thin: each one extracts
//! its input, calls [`momento_db::service::MomentoService`] or the
//! [`momento_assistant::Assistant`], and maps failures through [`error::ApiError`].

pub mod auth;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::info;

/// Bind `addr` and serve the router until the process is stopped.
///
/// # Errors
///
/// Returns the bind or accept error.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let auth = if state.auth_token.is_some() {
        "enabled"
    } else {
        "disabled"
    };
    let assistant = if state.assistant.is_some() {
        "enabled"
    } else {
        "disabled"
    };

    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, auth = %auth, assistant = %assistant, "starting service");

    axum::serve(listener, router(state)).await
}
