use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::auth::{check_write_token, WRITE_TOKEN_HEADER};
use crate::error::ApiError;
use crate::state::AppState;

/// Proof that the request carried the shared write token.
///
/// Place it before any body extractor so unauthorized requests are rejected
/// before the body is read.
#[derive(Debug, Clone, Copy)]
pub struct WriteAccess;

#[async_trait]
impl FromRequestParts<AppState> for WriteAccess {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let supplied = extract_write_token(&parts.headers);

        if check_write_token(supplied, &state.write_token).is_authorized() {
            Ok(WriteAccess)
        } else {
            tracing::warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                token_present = supplied.is_some(),
                "Rejected write request"
            );
            Err(ApiError::unauthorized())
        }
    }
}

/// Header value as text; a non-UTF-8 value counts as absent
fn extract_write_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(WRITE_TOKEN_HEADER).and_then(|v| v.to_str().ok())
}
