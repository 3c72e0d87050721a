use axum::{Router, middleware};
use axum_helpers::{TokenAuthenticator, api_cors_layer, jwt_auth_middleware};
use domain_patients::{PatientRepository, PatientService, handlers};

/// Mount point of the patient endpoints
pub const PATH: &str = "/api/v1/patients";

/// Patient routes behind authentication, with CORS outside of it so that
/// preflight requests never need a token.
pub fn router<R: PatientRepository + 'static>(
    service: PatientService<R>,
    authenticator: TokenAuthenticator,
    max_body_bytes: usize,
) -> Router {
    handlers::router(service, max_body_bytes)
        .layer(middleware::from_fn_with_state(
            authenticator,
            jwt_auth_middleware,
        ))
        .layer(api_cors_layer())
}
