//! Shared HTTP response handling for the model client.
//!
//! Centralizes status-code checks (429 with `Retry-After` parsing,
//! non-success → [`AssistantError::Api`]) so the provider stays focused on
//! request construction and response mapping.

use crate::error::AssistantError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success.
///
/// # Errors
///
/// - [`AssistantError::RateLimited`] for 429, honoring `Retry-After`
///   (60 s when absent or unparseable)
/// - [`AssistantError::Api`] with the status and body for any other failure
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, AssistantError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AssistantError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(AssistantError::Api {
            status,
            message: api_message(&body),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Google wraps failures as `{"error": {"message": ...}}`; fall back to the raw body.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
