//! HTTP-level tests for `POST /api/generate-palette` using the mock provider.

mod common;

use axum::http::StatusCode;
use common::{app_with, bakery_request, body_json, palette_document, post_json};
use palette_service::services::providers::mock::MockCompletionProvider;
use std::sync::Arc;

const ENDPOINT: &str = "/api/generate-palette";

#[tokio::test]
async fn well_formed_reply_returns_palette() {
    let provider = Arc::new(MockCompletionProvider::with_text(
        palette_document().to_string(),
    ));
    let app = app_with(provider.clone());

    let response = post_json(app, ENDPOINT, bakery_request().to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["palette"], palette_document());

    // The prompt carried the request and the generation parameters.
    let sent = provider.last_request().expect("provider was called");
    assert_eq!(sent.model, "test-model");
    assert_eq!(sent.max_tokens, 768);
    assert_eq!(sent.messages.len(), 1);
    assert_eq!(sent.messages[0].role, "user");
    let prompt = &sent.messages[0].content;
    for field in ["bakery", "food", "families", "playful", "warm", "web"] {
        assert!(prompt.contains(field), "prompt is missing {field}");
    }
}

#[tokio::test]
async fn fenced_reply_is_accepted() {
    let reply = format!("```json\n{}\n```", palette_document());
    let app = app_with(Arc::new(MockCompletionProvider::with_text(reply)));

    let response = post_json(app, ENDPOINT, bakery_request().to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["palette"]["fontSuggestion"], "Nunito");
}

#[tokio::test]
async fn empty_reply_is_server_error() {
    let app = app_with(Arc::new(MockCompletionProvider::with_text("")));

    let response = post_json(app, ENDPOINT, bakery_request().to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
    assert!(body.get("palette").is_none());
}

#[tokio::test]
async fn code_like_reply_is_rejected() {
    let app = app_with(Arc::new(MockCompletionProvider::with_text(
        "__import__('os').system('x')",
    )));

    let response = post_json(app, ENDPOINT, bakery_request().to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["detail"],
        "Palette generation failed: AI did not return valid JSON."
    );
    assert!(!body.to_string().contains("__import__"));
}

#[tokio::test]
async fn reply_missing_a_role_is_server_error() {
    let mut doc = palette_document();
    doc.as_object_mut().unwrap().remove("accent");
    let app = app_with(Arc::new(MockCompletionProvider::with_text(doc.to_string())));

    let response = post_json(app, ENDPOINT, bakery_request().to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await.get("palette").is_none());
}

#[tokio::test]
async fn provider_failure_does_not_leak_cause() {
    let app = app_with(Arc::new(MockCompletionProvider::unauthorized()));

    let response = post_json(app, ENDPOINT, bakery_request().to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["detail"],
        "Palette generation failed: the inference provider did not return a response."
    );
    assert!(!body.to_string().contains("hf_mock"));
}

#[tokio::test]
async fn provider_timeout_is_server_error() {
    let app = app_with(Arc::new(MockCompletionProvider::timing_out()));

    let response = post_json(app, ENDPOINT, bakery_request().to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_field_is_bad_request_and_skips_provider() {
    let provider = Arc::new(MockCompletionProvider::with_text(
        palette_document().to_string(),
    ));
    let mut request = bakery_request();
    request.as_object_mut().unwrap().remove("industry");

    let response = post_json(app_with(provider.clone()), ENDPOINT, request.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["detail"].is_string());
    assert!(provider.last_request().is_none());
}

#[tokio::test]
async fn wrong_type_is_bad_request() {
    let provider = Arc::new(MockCompletionProvider::with_text(
        palette_document().to_string(),
    ));
    let mut request = bakery_request();
    request["usage"] = serde_json::json!("web");

    let response = post_json(app_with(provider.clone()), ENDPOINT, request.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(provider.last_request().is_none());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = app_with(Arc::new(MockCompletionProvider::with_text("{}")));

    let response = post_json(app, ENDPOINT, "{not json".to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_business_type_is_bad_request() {
    let provider = Arc::new(MockCompletionProvider::with_text(
        palette_document().to_string(),
    ));
    let mut request = bakery_request();
    request["businessType"] = serde_json::json!("");

    let response = post_json(app_with(provider.clone()), ENDPOINT, request.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(provider.last_request().is_none());
}

#[tokio::test]
async fn empty_usage_is_accepted() {
    let provider = Arc::new(MockCompletionProvider::with_text(
        palette_document().to_string(),
    ));
    let mut request = bakery_request();
    request["usage"] = serde_json::json!([]);

    let response = post_json(app_with(provider.clone()), ENDPOINT, request.to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let prompt = provider.last_request().unwrap().messages[0].content.clone();
    assert!(!prompt.contains("Palette will be used for"));
}
