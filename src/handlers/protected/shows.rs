use axum::{body::Bytes, extract::State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, QueryParams, WriteAccess};
use crate::state::AppState;
use crate::validation::{validate_id, validate_new_show};

#[derive(Debug, Default, Deserialize)]
pub struct CreateShowBody {
    pub show_date: Option<String>,
    pub venue: Option<String>,
    pub band: Option<String>,
}

/// POST /shows - Record a new show
pub async fn create(State(state): State<AppState>, _access: WriteAccess, body: Bytes) -> ApiResult<()> {
    let body: CreateShowBody = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected create body: {}", e);
        ApiError::invalid_json("Invalid JSON body")
    })?;

    let show = validate_new_show(body.show_date.as_deref(), body.venue.as_deref(), body.band.as_deref())?;
    let show_date = show.show_date;

    state.store.insert(show).await?;
    tracing::info!(%show_date, "Created show");

    Ok(ApiResponse::ok())
}

/// DELETE /shows?id=<id> - Remove a show. Unknown ids succeed without effect.
pub async fn delete(
    State(state): State<AppState>,
    _access: WriteAccess,
    params: QueryParams,
) -> ApiResult<()> {
    let id = validate_id(params.first("id"))?;

    let removed = state.store.delete(id).await?;
    tracing::info!(id, removed, "Deleted show");

    Ok(ApiResponse::ok())
}
