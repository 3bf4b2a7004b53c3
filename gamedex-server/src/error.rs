//! API error type and mappings from the storage layer.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gamedex_db::OperationError;
use serde_json::json;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

/// An API-facing error: status code plus a client-safe message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::NotFound { .. } => Self::not_found(err.to_string()),
            OperationError::Invalid { .. } => Self::bad_request(err.to_string()),
            // Storage detail stays in the server log; the wire gets a
            // generic message.
            OperationError::Sqlite(e) => {
                log::error!("database error: {e}");
                Self::internal("Database query failed")
            }
        }
    }
}
