use axum::{Json, http::StatusCode};
use core_config::AppInfo;
use serde::Serialize;

/// Body of the `/health` endpoint. Empty fields are left out.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    #[serde(skip_serializing_if = "str::is_empty")]
    pub version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub build_date: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub message: &'static str,
}

/// Turns the outcome of a dependency check into the health response:
/// `200 "OK"` when it passed, `500 "Error"` otherwise.
pub fn health_response<E: std::fmt::Display>(
    info: &AppInfo,
    check: Result<(), E>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, message) = match check {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error")
        }
    };

    (
        status,
        Json(HealthResponse {
            version: info.version,
            build_date: info.build_date,
            message,
        }),
    )
}
