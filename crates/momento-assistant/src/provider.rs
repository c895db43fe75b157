//! The seam between the tool-calling loop and a concrete model API.

use async_trait::async_trait;

use crate::content::{Content, FunctionDeclaration};
use crate::error::AssistantError;

/// One model call.
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub system: &'a str,
    pub contents: &'a [Content],
    /// Functions the model may call. Empty disables tool calling.
    pub tools: &'a [FunctionDeclaration],
    /// Ask for a bare JSON reply.
    pub json_output: bool,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl<'a> ModelRequest<'a> {
    #[must_use]
    pub const fn new(system: &'a str, contents: &'a [Content]) -> Self {
        Self {
            system,
            contents,
            tools: &[],
            json_output: false,
            temperature: None,
            max_output_tokens: None,
        }
    }

    #[must_use]
    pub const fn with_tools(mut self, tools: &'a [FunctionDeclaration]) -> Self {
        self.tools = tools;
        self
    }
}

/// A model that answers a conversation with either text or function calls.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Produce the next model turn.
    async fn generate(&self, request: ModelRequest<'_>) -> Result<Content, AssistantError>;
}
