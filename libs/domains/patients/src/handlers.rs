use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::AppError;
use http_body_util::LengthLimitError;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PatientResult;
use crate::models::{CreatePatient, Patient};
use crate::repository::PatientRepository;
use crate::service::PatientService;

pub const TAG: &str = "patients";

/// OpenAPI documentation for Patients API
#[derive(OpenApi)]
#[openapi(
    paths(list_patients, create_patient, get_patient),
    components(schemas(Patient, CreatePatient)),
    tags(
        (name = TAG, description = "Patient records")
    )
)]
pub struct ApiDoc;

struct PatientsState<R: PatientRepository> {
    service: PatientService<R>,
    max_body_bytes: usize,
}

/// Create the patient router with all HTTP endpoints.
///
/// `max_body_bytes` caps the size of a create request body.
pub fn router<R: PatientRepository + 'static>(
    service: PatientService<R>,
    max_body_bytes: usize,
) -> Router {
    let shared_state = Arc::new(PatientsState {
        service,
        max_body_bytes,
    });

    Router::new()
        .route("/", get(list_patients).post(create_patient))
        .route("/{id}", get(get_patient))
        .with_state(shared_state)
}

/// List all patients
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "List of patients", body = Vec<Patient>),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    )
)]
async fn list_patients<R: PatientRepository>(
    State(state): State<Arc<PatientsState<R>>>,
) -> PatientResult<Json<Vec<Patient>>> {
    let patients = state.service.list_patients().await?;
    Ok(Json(patients))
}

/// Create a new patient
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer" = [])),
    request_body = CreatePatient,
    responses(
        (status = 201, description = "Patient created", body = Patient,
            headers(("Location" = String, description = "URL of the new patient"))),
        (status = 400, description = "Malformed JSON body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 413, description = "Body larger than the configured maximum"),
        (status = 500, description = "Store failure")
    )
)]
async fn create_patient<R: PatientRepository>(
    State(state): State<Arc<PatientsState<R>>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, AppError> {
    let oversized = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|length| *length > state.max_body_bytes as u64);

    // Refuse before reading anything
    if let Some(length) = oversized {
        return Err(AppError::PayloadTooLarge(format!(
            "declared {} bytes, limit {}",
            length, state.max_body_bytes
        )));
    }

    let bytes = to_bytes(body, state.max_body_bytes).await.map_err(|e| {
        if exceeds_length_limit(&e) {
            AppError::PayloadTooLarge(format!("body over {} bytes", state.max_body_bytes))
        } else {
            AppError::BadRequest(format!("Failed to read request body: {}", e))
        }
    })?;

    let input: CreatePatient = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::BadRequest(format!("Failed to decode new patient data: {}", e)))?;

    let patient = state.service.create_patient(input).await?;

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or_default();
    let location = format!(
        "http://{}{}/{}",
        host,
        uri.path().trim_end_matches('/'),
        patient.id
    );

    let mut response = (StatusCode::CREATED, Json(patient)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

fn exceeds_length_limit(err: &axum::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

/// Get a patient by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 400, description = "ID is not a 32-bit integer"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Patient not found"),
        (status = 500, description = "Store failure")
    )
)]
async fn get_patient<R: PatientRepository>(
    State(state): State<Arc<PatientsState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid patient id {:?}", id)))?;

    let patient = state.service.get_patient(id).await?;
    Ok(Json(patient))
}
