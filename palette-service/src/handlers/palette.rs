//! Palette generation endpoint.
//!
//! One request makes exactly one provider call. Provider and interpretation
//! failures reach the client only as fixed messages; causes go to the log.

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use service_core::error::AppError;
use std::time::Instant;
use thiserror::Error;
use validator::Validate;

use crate::models::{PaletteRequest, PaletteResponse, PaletteResult};
use crate::services::metrics;
use crate::services::providers::{ChatMessage, CompletionRequest, FinishReason, ProviderError};
use crate::services::{interpret, ParseFailure};
use crate::startup::AppState;

const INFERENCE_FAILED_DETAIL: &str =
    "Palette generation failed: the inference provider did not return a response.";
const INVALID_OUTPUT_DETAIL: &str = "Palette generation failed: AI did not return valid JSON.";

/// Failure of one palette generation.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("invalid request: {0}")]
    RequestShape(#[from] validator::ValidationErrors),

    #[error("inference call failed: {0}")]
    InferenceCall(#[from] ProviderError),

    #[error("model output unusable: {0}")]
    Parse(#[from] ParseFailure),
}

impl PaletteError {
    /// Label for `palette_generations_total`.
    pub fn outcome(&self) -> &'static str {
        match self {
            PaletteError::RequestShape(_) => "invalid_request",
            PaletteError::InferenceCall(_) => "inference_error",
            PaletteError::Parse(failure) => failure.reason(),
        }
    }
}

impl From<PaletteError> for AppError {
    fn from(err: PaletteError) -> Self {
        match err {
            PaletteError::RequestShape(errors) => AppError::ValidationError(errors),
            PaletteError::InferenceCall(cause) => {
                tracing::error!(error = %cause, kind = cause.kind(), "Inference call failed");
                AppError::ServerError(INFERENCE_FAILED_DETAIL.to_string())
            }
            PaletteError::Parse(failure) => {
                tracing::error!(
                    reason = %failure,
                    raw = %failure.raw(),
                    "Model output could not be interpreted"
                );
                AppError::ServerError(INVALID_OUTPUT_DETAIL.to_string())
            }
        }
    }
}

/// `POST /api/generate-palette`
#[tracing::instrument(skip_all)]
pub async fn generate_palette(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<PaletteRequest>, AppError>,
) -> Result<Json<PaletteResponse>, AppError> {
    match generate(&state, request).await {
        Ok(palette) => {
            metrics::record_generation("success");
            Ok(Json(PaletteResponse { palette }))
        }
        Err(err) => {
            metrics::record_generation(err.outcome());
            Err(err.into())
        }
    }
}

/// Validate, prompt, call the provider once and interpret the reply.
pub async fn generate(
    state: &AppState,
    request: PaletteRequest,
) -> Result<PaletteResult, PaletteError> {
    request.validate()?;

    let prompt = state.prompt_builder.build_prompt(&request);
    let inference = &state.config.inference;
    let completion_request = CompletionRequest {
        model: inference.model.clone(),
        messages: vec![ChatMessage::user(prompt)],
        max_tokens: inference.max_tokens,
        temperature: inference.temperature,
    };

    let provider = state.provider.name();
    let started = Instant::now();
    let result = state.provider.complete(&completion_request).await;
    let elapsed = started.elapsed();
    metrics::record_provider_latency(provider, &inference.model, elapsed.as_secs_f64());

    let completion = result.inspect_err(|e| {
        metrics::record_provider_error(provider, e.kind());
    })?;

    metrics::record_tokens(
        &inference.model,
        completion.input_tokens,
        completion.output_tokens,
    );

    tracing::debug!(
        provider,
        model = %inference.model,
        latency_secs = elapsed.as_secs_f64(),
        output_len = completion.text.len(),
        finish_reason = completion.finish_reason.as_str(),
        "Completion received"
    );

    if completion.finish_reason == FinishReason::Length {
        tracing::warn!(
            max_tokens = inference.max_tokens,
            "Completion stopped at the token limit; reply may be truncated"
        );
    }

    Ok(interpret(&completion.text)?)
}
