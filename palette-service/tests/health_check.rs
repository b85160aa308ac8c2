//! Infrastructure endpoint and middleware tests.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{app_with, bakery_request, body_json, body_text, get, palette_document, test_config};
use palette_service::services::providers::mock::MockCompletionProvider;
use palette_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

fn mock() -> Arc<MockCompletionProvider> {
    Arc::new(MockCompletionProvider::with_text(
        palette_document().to_string(),
    ))
}

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    let app = Application::build_with_provider(test_config(), mock())
        .await
        .expect("Failed to build application");

    let port = app.http_port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn root_returns_status_payload() {
    let port = spawn_app().await;

    let response = Client::new()
        .get(format!("http://localhost:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "PaletteAI Backend is running");
    assert_eq!(body["service"], "palette-service");
}

#[tokio::test]
async fn served_app_generates_palette() {
    let port = spawn_app().await;

    let response = Client::new()
        .post(format!("http://localhost:{}/api/generate-palette", port))
        .json(&bakery_request())
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["palette"]["primary"], "#F4A261");
}

#[tokio::test]
async fn ready_reflects_provider_health() {
    let response = get(app_with(mock()), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        app_with(Arc::new(MockCompletionProvider::unauthorized())),
        "/ready",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn metrics_endpoint_exposes_http_counters() {
    let app = app_with(mock());

    let _ = get(app.clone(), "/").await;
    let response = get(app, "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("http_requests_total"));
}

#[tokio::test]
async fn unknown_route_is_not_found_with_detail() {
    let response = get(app_with(mock()), "/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["detail"].is_string());
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let response = app_with(mock())
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let response = app_with(mock())
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/generate-palette")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
