use super::LlmClient;
use crate::domain::error::{AppError, Result};
use crate::domain::provider::ProviderSettings;
use crate::infrastructure::response::first_digit_run;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}

/// Hugging Face Inference API client. The text-generation endpoint
/// answers with a list of `{"generated_text": ...}` objects.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl HuggingFaceClient {
    pub fn new(settings: ProviderSettings, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            settings,
        }
    }

    fn endpoint_url(&self) -> String {
        let base_url = self.settings.base_url.trim_end_matches('/');
        format!("{}/{}", base_url, self.settings.model)
    }
}

#[async_trait]
impl LlmClient for HuggingFaceClient {
    fn name(&self) -> &'static str {
        self.settings.kind.as_str()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint_url();

        let mut request = self.client.post(&url).json(&InferenceRequest { inputs: prompt });
        if let Some(token) = &self.settings.api_key {
            request = request.bearer_auth(token);
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

        let generations: Vec<Generation> = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        let generated = generations
            .first()
            .map(|g| g.generated_text.trim().to_string())
            .ok_or_else(|| AppError::LLMError("Empty generation list".to_string()))?;

        debug!(model = %self.settings.model, response = %generated, "Hugging Face generation received");

        // Prefer the first number in the generated text, else return it whole.
        Ok(first_digit_run(&generated).unwrap_or(generated))
    }
}
