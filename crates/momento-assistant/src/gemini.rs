//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use momento_config::AssistantConfig;
use serde::{Deserialize, Serialize};

use crate::content::{Content, FunctionDeclaration, MODEL_ROLE, Part};
use crate::error::AssistantError;
use crate::http::check_response;
use crate::provider::{ChatProvider, ModelRequest};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: &'a [Content],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolGroup<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolGroup<'a> {
    function_declarations: &'a [FunctionDeclaration],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

impl GenerationConfig {
    fn from_request(request: &ModelRequest<'_>) -> Option<Self> {
        let config = Self {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            response_mime_type: request.json_output.then_some("application/json"),
        };
        let is_empty = config.temperature.is_none()
            && config.max_output_tokens.is_none()
            && config.response_mime_type.is_none();
        (!is_empty).then_some(config)
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_turn(self) -> Result<Content, AssistantError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map_or_else(|| "no candidates".to_string(), |r| format!("prompt blocked: {r}"));
            return Err(AssistantError::InvalidResponse(reason));
        };

        match candidate.content {
            Some(mut content) if !content.parts.is_empty() => {
                content.role = MODEL_ROLE.to_string();
                Ok(content)
            }
            _ => Err(AssistantError::InvalidResponse(format!(
                "empty candidate (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}

/// HTTP client for the Gemini API.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::NotConfigured`] without an API key, or
    /// [`AssistantError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        if !config.is_configured() {
            return Err(AssistantError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("momento/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn generate(&self, request: ModelRequest<'_>) -> Result<Content, AssistantError> {
        let body = GenerateContentRequest {
            system_instruction: (!request.system.is_empty()).then(|| SystemInstruction {
                parts: vec![Part::text(request.system)],
            }),
            contents: request.contents,
            tools: if request.tools.is_empty() {
                Vec::new()
            } else {
                vec![ToolGroup {
                    function_declarations: request.tools,
                }]
            },
            generation_config: GenerationConfig::from_request(&request),
        };

        tracing::debug!(
            model = %self.model,
            turns = request.contents.len(),
            tools = request.tools.len(),
            "calling generateContent"
        );
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;
        data.into_turn()
    }
}
