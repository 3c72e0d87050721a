use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Middleware that marks responses as JSON unless the handler chose a
/// content type itself.
pub async fn default_json_content_type(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    response
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    fn router() -> Router {
        Router::new()
            .route("/bare", get(|| async { StatusCode::NO_CONTENT }))
            .route("/text", get(|| async { "plain" }))
            .layer(middleware::from_fn(default_json_content_type))
    }

    async fn content_type(uri: &str) -> String {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_sets_json_when_missing() {
        assert_eq!(content_type("/bare").await, "application/json");
    }

    #[tokio::test]
    async fn test_keeps_handler_content_type() {
        assert!(content_type("/text").await.starts_with("text/plain"));
    }
}
