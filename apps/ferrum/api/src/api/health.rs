use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthResponse, health_response};
use core_config::AppInfo;
use domain_patients::{PatientRepository, PatientService};
use std::sync::Arc;

pub struct HealthState<R: PatientRepository> {
    info: AppInfo,
    service: PatientService<R>,
}

pub fn router<R: PatientRepository + 'static>(info: AppInfo, service: PatientService<R>) -> Router {
    Router::new()
        .route("/health", get(health::<R>))
        .with_state(Arc::new(HealthState { info, service }))
}

/// Report build information and whether the patient store answers a ping
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable"),
        (status = 500, description = "Store unreachable")
    )
)]
pub async fn health<R: PatientRepository>(
    State(state): State<Arc<HealthState<R>>>,
) -> (StatusCode, Json<HealthResponse>) {
    health_response(&state.info, state.service.check_health().await)
}
