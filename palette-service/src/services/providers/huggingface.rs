//! Hugging Face inference router provider.
//!
//! Talks to the router's OpenAI-compatible chat completion endpoint. The
//! upstream provider is selected by suffixing the model id (`model:provider`).

use super::{
    ChatMessage, Completion, CompletionProvider, CompletionRequest, FinishReason, ProviderError,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on how much of an error body ends up in an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Hugging Face provider configuration.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_token: Secret<String>,
    pub provider: String,
    pub base_url: String,
    pub timeout: Duration,
}

pub struct HuggingFaceProvider {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceProvider {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Model id as the router expects it.
    fn routed_model(&self, model: &str) -> String {
        let provider = self.config.provider.trim();
        if provider.is_empty() || provider.eq_ignore_ascii_case("auto") || model.contains(':') {
            model.to_string()
        } else {
            format!("{}:{}", model, provider)
        }
    }
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let body = ChatCompletionRequest {
            model: self.routed_model(&request.model),
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %body.model,
            messages = request.messages.len(),
            "Sending chat completion to Hugging Face router"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error_text: String = error_text.chars().take(MAX_ERROR_BODY_CHARS).collect();

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(ProviderError::Unauthorized(format!(
                    "{}: {}",
                    status, error_text
                )));
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Hugging Face API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::ApiError(format!("Failed to parse response: {}", e))
            }
        })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError("Response contained no choices".to_string()))?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("stop") | Some("eos") | Some("stop_sequence") => FinishReason::Complete,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Unknown,
        };

        let usage = api_response.usage.unwrap_or_default();

        Ok(Completion {
            text: choice.message.content.unwrap_or_default(),
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            finish_reason,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_token.expose_secret().is_empty() {
            Err(ProviderError::NotConfigured(
                "Hugging Face API token not configured".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Chat completion wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: String,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(provider: &str) -> HuggingFaceProvider {
        HuggingFaceProvider::new(HuggingFaceConfig {
            api_token: Secret::new(String::new()),
            provider: provider.to_string(),
            base_url: "https://router.example/".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn model_is_suffixed_with_provider() {
        assert_eq!(
            provider("novita").routed_model("mistralai/Mistral-7B-Instruct-v0.3"),
            "mistralai/Mistral-7B-Instruct-v0.3:novita"
        );
        assert_eq!(provider("auto").routed_model("m"), "m");
        assert_eq!(provider("").routed_model("m"), "m");
        assert_eq!(provider("novita").routed_model("m:together"), "m:together");
    }

    #[test]
    fn url_has_no_double_slash() {
        assert_eq!(
            provider("novita").completions_url(),
            "https://router.example/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn empty_token_is_not_ready() {
        assert!(matches!(
            provider("novita").health_check().await,
            Err(ProviderError::NotConfigured(_))
        ));
    }
}
