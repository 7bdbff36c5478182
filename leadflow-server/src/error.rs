//! API error responses
//!
//! Every error leaving a handler renders as the `{"success": false, ...}`
//! envelope the clients consume.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request payload (400)
    #[error("{0}")]
    BadRequest(String),

    /// Store failure (500)
    #[error(transparent)]
    Store(#[from] leadflow_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": message,
                }),
            ),
            ApiError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "message": "Error processing request",
                    "error": err.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
