use axum::http::Method;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

/// Creates the CORS layer for the public API routes.
///
/// # Returns
/// A configured `CorsLayer` with:
/// - Any origin (`Access-Control-Allow-Origin: *`)
/// - Methods POST and OPTIONS
/// - Allowed headers mirrored from `Access-Control-Request-Headers`
///
/// Every `OPTIONS` request is answered by the layer itself with `200` and an
/// empty body; the wrapped service never sees it.
pub fn api_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}
