//! Shared handler state.

use std::sync::Arc;

use momento_assistant::{Assistant, AssistantError};
use momento_config::MomentoConfig;
use momento_db::service::MomentoService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MomentoService>,
    /// `None` when no API key is configured.
    pub assistant: Option<Arc<Assistant>>,
    /// Bearer token every request must carry, when set.
    pub auth_token: Option<String>,
    pub permissive_cors: bool,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<MomentoService>) -> Self {
        Self {
            service,
            assistant: None,
            auth_token: None,
            permissive_cors: true,
        }
    }

    /// State for `service` with the server and assistant sections of `config`.
    #[must_use]
    pub fn from_config(service: Arc<MomentoService>, config: &MomentoConfig) -> Self {
        let assistant = match Assistant::from_config(config) {
            Ok(assistant) => Some(Arc::new(assistant)),
            Err(AssistantError::NotConfigured) => {
                tracing::info!("assistant disabled: no API key configured");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "assistant disabled");
                None
            }
        };
        Self {
            service,
            assistant,
            auth_token: config.server.auth_token().map(String::from),
            permissive_cors: config.server.permissive_cors,
        }
    }

    #[must_use]
    pub fn with_assistant(mut self, assistant: Assistant) -> Self {
        self.assistant = Some(Arc::new(assistant));
        self
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// # Errors
    ///
    /// Returns [`AssistantError::NotConfigured`] when no assistant is available.
    pub fn assistant(&self) -> Result<&Assistant, AssistantError> {
        self.assistant.as_deref().ok_or(AssistantError::NotConfigured)
    }
}
