use super::jwt::{AuthError, TokenAuthenticator};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract the token from an `Authorization: Bearer <token>` header.
/// The scheme name is matched case-insensitively.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.trim_start().split_once(char::is_whitespace))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware
///
/// Verifies the bearer token's signature and expiry. Any failure produces
/// the same plain `401 Unauthorized`; the reason is logged at debug level.
/// Accepted requests reach the inner service unchanged.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::auth::{TokenAuthenticator, jwt_auth_middleware};
///
/// let protected_routes = Router::new()
///     .route("/api/protected", get(protected_handler))
///     .layer(axum::middleware::from_fn_with_state(
///         authenticator,
///         jwt_auth_middleware,
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<TokenAuthenticator>,
    request: Request,
    next: Next,
) -> Response {
    let verified = extract_bearer_token(request.headers())
        .ok_or(AuthError::MissingToken)
        .and_then(|token| auth.verify(token));

    match verified {
        Ok(_) => next.run(request).await,
        Err(e) => {
            tracing::debug!("Rejecting request: {}", e);
            AppError::Unauthorized(e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, JwtConfig, TokenIssuer};
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{HeaderValue, StatusCode},
        middleware,
        routing::get,
    };
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn protected_router(auth: TokenAuthenticator) -> Router {
        Router::new()
            .route(
                "/",
                get(|request: Request| async move {
                    // Claims are not handed to the application
                    if request.extensions().get::<Claims>().is_some() {
                        "claims"
                    } else {
                        "plain"
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("BEARER  abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearerabc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_valid_token_passes_request_through_unchanged() {
        let clock: crate::auth::Clock =
            Arc::new(|| Utc.timestamp_opt(1_587_081_600, 0).unwrap());
        let config = JwtConfig::new("deadbeef", "ferrum", Duration::from_secs(60));
        let token = TokenIssuer::new(&config, clock.clone()).issue().unwrap();
        let app = protected_router(TokenAuthenticator::new(&config, clock));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::AUTHORIZATION, format!("bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"plain");

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
