//! Mock provider implementation for testing.

use super::{Completion, CompletionProvider, CompletionRequest, FinishReason, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockReply {
    Text(String),
    Unauthorized,
    Timeout,
}

/// Mock completion provider with a canned reply.
pub struct MockCompletionProvider {
    reply: MockReply,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletionProvider {
    /// Replies with `text` to every call.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    /// Fails every call as an auth error.
    pub fn unauthorized() -> Self {
        Self::new(MockReply::Unauthorized)
    }

    /// Fails every call as a timeout.
    pub fn timing_out() -> Self {
        Self::new(MockReply::Timeout)
    }

    fn new(reply: MockReply) -> Self {
        Self {
            reply,
            last_request: Mutex::new(None),
        }
    }

    /// The most recent request seen, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(Completion {
                text: text.clone(),
                input_tokens: request
                    .messages
                    .iter()
                    .map(|m| m.content.len() as u32 / 4)
                    .sum(),
                output_tokens: text.len() as u32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockReply::Unauthorized => Err(ProviderError::Unauthorized(
                "401 Unauthorized: invalid token hf_mock".to_string(),
            )),
            MockReply::Timeout => Err(ProviderError::Timeout),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match self.reply {
            MockReply::Unauthorized => Err(ProviderError::NotConfigured(
                "Mock provider has no credential".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
