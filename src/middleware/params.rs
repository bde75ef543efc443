use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::error::ApiError;

/// Query string as ordered key/value pairs.
///
/// Repeated keys are allowed; lookups return the first occurrence. Anything
/// axum cannot decode is rejected with a JSON `{error}` body.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => Ok(QueryParams(pairs)),
            Err(rejection) => {
                tracing::debug!("Rejected query string: {}", rejection);
                Err(ApiError::bad_request(rejection.body_text()))
            }
        }
    }
}
