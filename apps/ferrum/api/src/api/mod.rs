use axum::{Json, Router, middleware, routing::get};
use axum_helpers::{
    Clock, TokenAuthenticator, TokenIssuer, default_json_content_type, errors::handlers::not_found,
    trace_layer,
};
use domain_patients::{PatientRepository, PatientService};
use utoipa::OpenApi;

use crate::config::Config;
use crate::openapi::ApiDoc;

pub mod health;
pub mod patients;
pub mod token;

/// Builds the full application router.
///
/// Layers, outermost first: request tracing, default JSON content type,
/// then CORS and bearer authentication on the patient routes only.
/// `/health`, `/generate-token` and the OpenAPI document are public.
pub fn routes<R: PatientRepository + 'static>(
    config: &Config,
    service: PatientService<R>,
    clock: Clock,
) -> Router {
    let authenticator = TokenAuthenticator::new(&config.jwt, clock.clone());
    let issuer = TokenIssuer::new(&config.jwt, clock);

    let router = Router::new()
        .merge(health::router(config.app, service.clone()))
        .merge(token::router(issuer))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest(
            patients::PATH,
            patients::router(service, authenticator, config.server.max_body_bytes),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(default_json_content_type));

    trace_layer(router)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
