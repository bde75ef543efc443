use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Success envelope for the show endpoints: `{data: ...}` or `{ok: true}`
#[derive(Debug)]
pub enum ApiResponse<T: Serialize> {
    Data(T),
    Ok,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        ApiResponse::Data(data)
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        ApiResponse::Ok
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Ok => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
            ApiResponse::Data(data) => {
                let data_value = match serde_json::to_value(&data) {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::error!("Failed to serialize response data: {}", e);
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({ "error": "Failed to serialize response data" })),
                        )
                            .into_response();
                    }
                };

                (StatusCode::OK, Json(json!({ "data": data_value }))).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
