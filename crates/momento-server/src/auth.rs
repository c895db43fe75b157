//! Optional bearer-token gate in front of every route.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = state.auth_token.as_deref() {
        check_bearer(request.headers(), token)?;
    }
    Ok(next.run(request).await)
}

fn check_bearer(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;
    let value = header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid authorization header"))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if token == expected => Ok(()),
        _ => {
            tracing::warn!("unauthorized request");
            Err(ApiError::unauthorized("Invalid API key"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_matching_token() {
        assert!(check_bearer(&headers("Bearer s3cret"), "s3cret").is_ok());
    }

    #[test]
    fn rejects_missing_wrong_or_unprefixed() {
        let missing = check_bearer(&HeaderMap::new(), "s3cret").unwrap_err();
        assert_eq!(missing.message, "Missing authorization");

        for value in ["Bearer nope", "s3cret", "Basic s3cret"] {
            let err = check_bearer(&headers(value), "s3cret").unwrap_err();
            assert_eq!(err.message, "Invalid API key", "{value}");
        }
    }
}
