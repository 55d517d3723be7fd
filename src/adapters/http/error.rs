//! Error body shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// JSON error body: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "internal server error")
    }
}

/// HTTP status for each error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::UserNotFound | ErrorCode::SongNotFound | ErrorCode::ReviewNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders an error. Server-side failures are logged and their detail is
/// kept out of the response body.
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> Response {
    let status = status_for(code);
    let message = message.into();
    if status.is_server_error() {
        tracing::error!(code = %code, error = %message, "Request failed");
        return (status, Json(ErrorResponse::internal())).into_response();
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

/// 400 for a path id that is not a positive integer.
pub fn invalid_id(resource: &str) -> Response {
    error_response(
        ErrorCode::ValidationFailed,
        format!("invalid {} id", resource),
    )
}
