use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{AppError, TokenIssuer};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

pub fn router(issuer: TokenIssuer) -> Router {
    Router::new()
        .route("/generate-token", get(generate_token))
        .with_state(issuer)
}

/// Issue a signed bearer token for the configured claim name
#[utoipa::path(
    get,
    path = "/generate-token",
    tag = "auth",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 500, description = "Signing failed")
    )
)]
pub async fn generate_token(State(issuer): State<TokenIssuer>) -> Result<Json<TokenResponse>, AppError> {
    let token = issuer
        .issue()
        .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))?;

    Ok(Json(TokenResponse { token }))
}
