use super::LlmClient;
use crate::domain::error::{AppError, Result};
use crate::domain::provider::ProviderSettings;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const SYSTEM_MESSAGE: &str =
    "You are a precise assistant. Return ONLY the exact value needed, with no commentary.";

/// OpenRouter chat-completions client.
pub struct OpenRouterClient {
    client: reqwest::Client,
    settings: ProviderSettings,
    referer: String,
    title: String,
}

impl OpenRouterClient {
    pub fn new(settings: ProviderSettings, referer: String, title: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            settings,
            referer,
            title,
        }
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    fn name(&self) -> &'static str {
        self.settings.kind.as_str()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let base_url = self.settings.base_url.trim_end_matches('/');
        let url = format!("{}/chat/completions", base_url);

        let body = json!({
            "model": self.settings.model,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_MESSAGE
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": 0.1,
        });

        let mut request = self
            .client
            .post(&url)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&body);
        if let Some(api_key) = &self.settings.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        debug!(model = %self.settings.model, "OpenRouter completion received");

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}
