//! Error types for revnote-server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use revnote_common::api::ErrorResponse;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// revnote-common error; status follows the inner variant
    #[error(transparent)]
    Common(#[from] revnote_common::Error),
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        use revnote_common::Error as CommonError;

        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Common(CommonError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Common(CommonError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Common(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
