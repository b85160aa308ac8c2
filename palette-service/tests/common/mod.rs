#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response};
use palette_service::config::PaletteConfig;
use palette_service::services::providers::CompletionProvider;
use palette_service::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn bakery_request() -> Value {
    json!({
        "businessType": "bakery",
        "industry": "food",
        "audience": "families",
        "designStyle": "playful",
        "colorPref": "warm",
        "usage": ["web"]
    })
}

pub fn palette_document() -> Value {
    json!({
        "primary": "#F4A261",
        "secondary": "#E76F51",
        "accent": "#2A9D8F",
        "neutral": "#FAF3E0",
        "background": "#FFFFFF",
        "highlight": "#E9C46A",
        "muted": "#A8A29E",
        "success": "#52B788",
        "fontSuggestion": "Nunito",
        "colorNamesDetailed": [
            { "role": "Primary", "name": "Sandy Orange" },
            { "role": "Secondary", "name": "Burnt Sienna" },
            { "role": "Accent", "name": "Persian Green" },
            { "role": "Neutral", "name": "Cream" },
            { "role": "Background", "name": "White" },
            { "role": "Highlight", "name": "Saffron" },
            { "role": "Muted", "name": "Stone" },
            { "role": "Success", "name": "Mint" }
        ],
        "colorNames": ["Primary", "Secondary", "Accent", "Neutral", "Background", "Highlight", "Muted", "Success"],
        "colorPsychology": [
            "Warm orange evokes fresh bread.",
            "Sienna feels rustic and handmade.",
            "Green adds a note of freshness.",
            "Cream reads as wholesome.",
            "White keeps layouts clean.",
            "Saffron draws the eye to offers.",
            "Stone grounds the palette.",
            "Mint signals success and calm."
        ]
    })
}

pub fn test_config() -> PaletteConfig {
    let mut config = PaletteConfig::default();
    config.common.port = 0;
    config.inference.model = "test-model".to_string();
    config
}

pub fn app_with(provider: Arc<dyn CompletionProvider>) -> axum::Router {
    build_router(AppState::new(test_config(), provider))
}

pub async fn post_json(app: axum::Router, uri: &str, body: String) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get(app: axum::Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
