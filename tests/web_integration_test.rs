//! Integration tests for the axum router.
//!
//! These tests drive the example handlers end to end, from raw HTTP request
//! to normalized envelope.

#![cfg(feature = "axum")]

use api_guard::safety::CONTENT_BLOCKED_MESSAGE;
use api_guard::web::example_handler::router;
use api_guard::VALIDATION_FAILED_MESSAGE;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn clean_link_is_accepted() {
    let (status, body) = send(
        Method::POST,
        "/links",
        Some(json!({
            "title": "Weekly reading",
            "link": "https://example.com/article",
            "description": "A short read about laundry logistics",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Content link submitted successfully");
    assert_eq!(body["data"]["link"], "https://example.com/article/");
}

#[tokio::test]
async fn blocked_link_is_reported_against_its_field() {
    let (status, body) = send(
        Method::POST,
        "/links",
        Some(json!({"title": "Promo", "link": "https://casino.example"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "message": VALIDATION_FAILED_MESSAGE,
            "errors": ["Link: URL blocked for security reasons: Blocked keyword detected: casino"],
        })
    );
}

#[tokio::test]
async fn blocked_description_is_reported_against_its_field() {
    let (status, body) = send(
        Method::POST,
        "/links",
        Some(json!({
            "title": "Deal",
            "link": "https://example.com/",
            "description": "Definitely not a scam",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([format!("Description: {}", CONTENT_BLOCKED_MESSAGE)])
    );
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/links")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Malformed request.");
}

#[tokio::test]
async fn wrong_method_is_405() {
    let (status, body) = send(Method::GET, "/links", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "Method not allowed for this endpoint.");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (status, body) = send(Method::GET, "/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "message": "The requested resource was not found.",
            "errors": null,
        })
    );
}

#[tokio::test]
async fn contact_update_validates_phone_and_avatar() {
    let (status, body) = send(
        Method::PUT,
        "/profile/contact",
        Some(json!({"phone_number": "07700900123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!(["Phone Number: Phone number must start with country code e.g. (+44)."])
    );

    let (status, body) = send(
        Method::PUT,
        "/profile/contact",
        Some(json!({"phone_number": "+447700900123", "avatar_file_name": "cv.pdf"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([
            "Avatar: Only image files are allowed. Supported formats: JPG, JPEG, PNG, GIF, WEBP"
        ])
    );

    let (status, body) = send(
        Method::PUT,
        "/profile/contact",
        Some(json!({"phone_number": "+447700900123", "avatar_file_name": "me.PNG"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact details updated successfully");
}
