//! Handler tests for Patients domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request decoding and body size limits
//! - Response serialization and the Location header
//! - HTTP status codes and plain-text error bodies
//!
//! They exercise only the patients router, not the full application with
//! authentication and CORS.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_patients::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

const MAX_BODY: usize = 1024;

fn app() -> axum::Router {
    let service = PatientService::new(InMemoryPatientRepository::new());
    handlers::router(service, MAX_BODY)
}

async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::HOST, "example.com")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_create_patient_returns_201_with_location() {
    let payload = json!({"first_name": "Bilbo", "last_name": "Baggins"}).to_string();

    let response = app().oneshot(post(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://example.com/1"
    );

    let patient: Patient = json_body(response.into_body()).await;
    assert_eq!(patient.id, 1);
    assert_eq!(patient.first_name, "Bilbo");
    assert_eq!(patient.last_name, "Baggins");
    assert_eq!(patient.email, "");
}

#[tokio::test]
async fn test_create_patient_malformed_json_returns_400() {
    let response = app().oneshot(post("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response.into_body()).await, b"Bad Request");
}

#[tokio::test]
async fn test_create_patient_non_object_json_returns_400() {
    for payload in ["[]", r#"["Bilbo","Baggins"]"#, r#""Bilbo""#, "null"] {
        let response = app().oneshot(post(payload)).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload {}",
            payload
        );
    }
}

#[tokio::test]
async fn test_create_patient_interrupted_body_returns_400() {
    let chunks: Vec<Result<&'static str, std::io::Error>> = vec![
        Ok(r#"{"first_name":"Bil"#),
        Err(std::io::Error::other("connection reset")),
    ];
    let body = Body::from_stream(tokio_stream::iter(chunks));

    let response = app().oneshot(post(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_patient_declared_length_over_limit_returns_413() {
    let payload = "x".repeat(MAX_BODY + 1);
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        body_bytes(response.into_body()).await,
        b"Payload Too Large"
    );
}

#[tokio::test]
async fn test_create_patient_streamed_body_over_limit_returns_413() {
    // No Content-Length header: the limit is enforced while reading
    let payload = format!("{{\"first_name\":\"{}\"}}", "a".repeat(MAX_BODY));

    let response = app().oneshot(post(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_list_patients_empty_is_json_array() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response.into_body()).await, b"[]");
}

#[tokio::test]
async fn test_get_patient_not_found_returns_404() {
    let response = app()
        .oneshot(Request::builder().uri("/123").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(response.into_body()).await, b"Not Found");
}

#[tokio::test]
async fn test_get_patient_invalid_id_returns_400() {
    for id in ["abc", "1.5", "2147483648"] {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {}", id);
    }
}

#[tokio::test]
async fn test_create_then_get_and_list() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post(json!({"first_name": "Frodo"}).to_string()))
        .await
        .unwrap();
    let created: Patient = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Patient = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let patients: Vec<Patient> = json_body(response.into_body()).await;
    assert_eq!(patients, vec![created]);
}
