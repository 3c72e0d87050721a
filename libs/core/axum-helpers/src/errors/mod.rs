pub mod handlers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error type that can be converted to HTTP responses.
///
/// The response body is always the plain-text canonical reason phrase for
/// the status code (for example `Not Found`). The carried detail is logged
/// and never sent to the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Plain-text response carrying only the canonical reason phrase of `status`
pub fn status_text_response(status: StatusCode) -> Response {
    (status, status.canonical_reason().unwrap_or_default()).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::InternalServerError(detail) => {
                tracing::error!(status = status.as_u16(), "Internal error: {}", detail);
            }
            AppError::Unauthorized(detail) => {
                tracing::debug!(status = status.as_u16(), "Unauthorized: {}", detail);
            }
            AppError::BadRequest(detail)
            | AppError::NotFound(detail)
            | AppError::PayloadTooLarge(detail) => {
                tracing::warn!(status = status.as_u16(), "Client error: {}", detail);
            }
        }
        status_text_response(status)
    }
}
