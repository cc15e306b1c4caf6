use super::metered::ChatApi;
use super::types::{ChatRequest, ChatResponse};
use atk_core::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Chat completions client for the OpenAI API (or any compatible endpoint)
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build a client from `OPENAI_API_KEY` / `OPENAI_BASE_URL`.
    ///
    /// Returns `None` when no API key is configured; callers degrade to a
    /// structured "no backend" result instead of failing.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        let mut client = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            client = client.with_base_url(base_url);
        }
        Some(client)
    }

    fn build_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatApi for OpenAIClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(model = %request.model, "sending chat completion request");

        let response = self
            .client
            .post(self.build_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::ChatError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::ChatError(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::ChatError(format!("Failed to parse response: {}", e)))
    }
}
