use super::types::{ChatRequest, ChatResponse};
use atk_core::{Result, UsageMeter};
use async_trait::async_trait;
use std::sync::Arc;

/// Chat completion backend.
///
/// The seam exists so cost metering and tests wrap the real client without
/// touching its internals.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Wrapper that reports token usage from each completion to a [`UsageMeter`].
///
/// LLM-backed tools construct one per call from the backend and the
/// invocation's meter. Responses without a usage block are passed through
/// unrecorded; accounting never gets in the way of the completion itself.
pub struct MeteredChat {
    inner: Arc<dyn ChatApi>,
    meter: UsageMeter,
}

impl MeteredChat {
    pub fn new(inner: Arc<dyn ChatApi>, meter: UsageMeter) -> Self {
        Self { inner, meter }
    }

    pub async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        let request_model = request.model.clone();
        let response = self.inner.complete(request).await?;

        if let Some(usage) = response.usage {
            // The request's model identifier wins; responses echo it back but
            // may be absent from mocked or non-OpenAI backends.
            let model = if request_model.is_empty() {
                response.model.clone().unwrap_or_else(|| "unknown".to_string())
            } else {
                request_model
            };
            self.meter
                .record(&model, usage.prompt_tokens, usage.completion_tokens);
        }

        Ok(response)
    }
}
