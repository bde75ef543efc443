use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Service name, version and endpoint summary
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "data": {
            "name": "Show Tracker",
            "version": version,
            "endpoints": {
                "list": "GET /shows?year=YYYY (public)",
                "create": "POST /shows (x-app-token)",
                "delete": "DELETE /shows?id=<id> (x-app-token)",
                "health": "GET /health (public)",
            }
        }
    }))
}

/// GET /health - Liveness of the backing store
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.store.ping().await {
        Ok(()) => Ok(Json(json!({
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }))),
        Err(e) => {
            tracing::error!("Store health check failed: {}", e);
            Err(ApiError::service_unavailable("store unavailable"))
        }
    }
}
