use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::patients;

/// Registers the bearer scheme referenced by the patient endpoints
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("HS256 token from /generate-token"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ferrum API",
        description = "Patient records over HTTP with bearer token authentication"
    ),
    paths(crate::api::health::health, crate::api::token::generate_token),
    components(schemas(crate::api::token::TokenResponse)),
    modifiers(&BearerSecurity),
    nest(
        (path = patients::PATH, api = domain_patients::ApiDoc)
    )
)]
pub struct ApiDoc;
