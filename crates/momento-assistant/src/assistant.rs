//! The bounded tool-calling loop.
//!
//! Each iteration sends the conversation to the model. A reply without a
//! function call ends the turn. Otherwise the first call is executed, the
//! call and its result are appended as two turns, and the loop continues
//! until the model answers in text or the iteration budget runs out.

use std::sync::Arc;

use chrono::Utc;
use momento_config::MomentoConfig;
use momento_core::time::DisplayOptions;
use momento_db::service::MomentoService;
use serde::{Deserialize, Serialize};

use crate::bridge::ToolBridge;
use crate::content::{Content, FunctionDeclaration, MODEL_ROLE, Part, USER_ROLE};
use crate::error::AssistantError;
use crate::gemini::GeminiProvider;
use crate::prompt::{chat_system_prompt, local_date};
use crate::provider::{ChatProvider, ModelRequest};
use crate::tools::declarations;

/// Reply used when the iteration budget is spent.
pub const EXHAUSTED_REPLY: &str =
    "I wasn't able to finish that request. Please try rephrasing or breaking it into smaller steps.";

const DEFAULT_MAX_ITERATIONS: u32 = 8;

/// Outcome of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// Model calls made.
    pub iterations: u32,
    /// True when the budget ran out before a text answer.
    pub exhausted: bool,
    /// Names of the tools executed, in order.
    pub tool_calls: Vec<String>,
}

pub struct Assistant {
    provider: Arc<dyn ChatProvider>,
    tools: Vec<FunctionDeclaration>,
    max_iterations: u32,
    display: DisplayOptions,
}

impl Assistant {
    #[must_use]
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            tools: declarations(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            display: DisplayOptions::default(),
        }
    }

    /// Gemini-backed assistant using the `assistant` and `display` sections.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::NotConfigured`] without an API key.
    pub fn from_config(config: &MomentoConfig) -> Result<Self, AssistantError> {
        let provider = GeminiProvider::from_config(&config.assistant)?;
        tracing::debug!(model = provider.model(), "assistant configured");
        Ok(Self::new(Arc::new(provider))
            .with_max_iterations(config.assistant.max_iterations)
            .with_display(config.display.options()))
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub const fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    pub(crate) fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }

    pub(crate) const fn display(&self) -> &DisplayOptions {
        &self.display
    }

    /// Answer the last message of `history`, executing tool calls against
    /// `service` along the way.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::InvalidRequest`] for an empty history and
    /// any provider error. Tool failures are fed back to the model instead.
    pub async fn respond(
        &self,
        service: &MomentoService,
        history: Vec<Content>,
    ) -> Result<ChatReply, AssistantError> {
        if history.is_empty() {
            return Err(AssistantError::InvalidRequest(
                "history must contain at least one message".into(),
            ));
        }

        let system = chat_system_prompt(local_date(Utc::now(), &self.display));
        let bridge = ToolBridge::new(service);
        let mut contents = history;
        let mut tool_calls = Vec::new();

        for iteration in 1..=self.max_iterations {
            let turn = self
                .provider
                .generate(ModelRequest::new(&system, &contents).with_tools(&self.tools))
                .await?;

            let Some((part, call)) = turn.first_function_call() else {
                return Ok(ChatReply {
                    reply: turn.text(),
                    iterations: iteration,
                    exhausted: false,
                    tool_calls,
                });
            };

            tracing::info!(iteration, tool = %call.name, "model requested tool");
            let response = bridge.call(&call.name, &call.args).await;
            tool_calls.push(call.name.clone());
            contents.push(Content {
                role: MODEL_ROLE.to_string(),
                parts: vec![part.clone()],
            });
            contents.push(Content {
                role: USER_ROLE.to_string(),
                parts: vec![Part::function_response(call.name.clone(), response)],
            });
        }

        tracing::warn!(
            max_iterations = self.max_iterations,
            tools = ?tool_calls,
            "assistant gave up without a text answer"
        );
        Ok(ChatReply {
            reply: EXHAUSTED_REPLY.to_string(),
            iterations: self.max_iterations,
            exhausted: true,
            tool_calls,
        })
    }
}
