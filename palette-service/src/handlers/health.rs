use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;

use crate::services::metrics::get_metrics;
use crate::startup::AppState;

/// Liveness probe.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "PaletteAI Backend is running",
        "service": "palette-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the inference provider has what it needs to be called.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.provider.health_check().await.map_err(|e| {
        tracing::warn!(provider = state.provider.name(), error = %e, "Provider not ready");
        AppError::ServiceUnavailable
    })?;

    Ok(StatusCode::OK)
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        get_metrics(),
    )
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
