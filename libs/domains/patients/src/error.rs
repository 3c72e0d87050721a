use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatientError {
    #[error("Patient not found: {0}")]
    NotFound(i32),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Store is closed")]
    Closed,
}

pub type PatientResult<T> = Result<T, PatientError>;

impl From<sea_orm::DbErr> for PatientError {
    fn from(err: sea_orm::DbErr) -> Self {
        PatientError::Store(err.to_string())
    }
}

/// Convert PatientError to AppError for standardized error responses
impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound(id) => AppError::NotFound(format!("Patient {} not found", id)),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for PatientError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
