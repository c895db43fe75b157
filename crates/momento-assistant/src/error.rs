//! Assistant error types.

use thiserror::Error;

/// Errors raised while talking to the model. Tool failures are not errors
/// here: they are reported back to the model as part of the conversation.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response could not be understood.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    /// The caller sent nothing to work with.
    #[error("{0}")]
    InvalidRequest(String),

    /// No API key is configured.
    #[error("assistant is not configured: set assistant.api_key or MOMENTO_ASSISTANT__API_KEY")]
    NotConfigured,
}

/// Failure of a single tool call. Reported to the model as
/// `{"error": "<message>"}` so it can explain or retry.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// Store and validation failures, with their user-facing message.
    #[error(transparent)]
    Store(#[from] momento_db::error::DatabaseError),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}
