pub mod hugging_face;
pub mod openrouter;

use crate::domain::error::Result;
use crate::infrastructure::response::{clean_llm_answer, is_unusable_answer};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub use hugging_face::HuggingFaceClient;
pub use openrouter::OpenRouterClient;

#[async_trait]
pub trait LlmClient {
    fn name(&self) -> &'static str;
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Tries each configured provider once, in priority order, and falls back
/// to a static answer when every provider is exhausted. One attempt per
/// provider; the per-attempt timeout lives on each provider's HTTP client.
pub struct FailoverClient {
    providers: Vec<Arc<dyn LlmClient + Send + Sync>>,
    fallback_answer: String,
}

impl FailoverClient {
    pub fn new(providers: Vec<Arc<dyn LlmClient + Send + Sync>>, fallback_answer: String) -> Self {
        Self {
            providers,
            fallback_answer,
        }
    }
}

#[async_trait]
impl LlmClient for FailoverClient {
    fn name(&self) -> &'static str {
        "failover"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        for provider in &self.providers {
            info!(provider = provider.name(), "Dispatching prompt to provider");

            match provider.complete(prompt).await {
                Ok(raw) => {
                    let answer = clean_llm_answer(&raw);
                    if is_unusable_answer(&answer) {
                        warn!(
                            provider = provider.name(),
                            answer = %answer,
                            "Provider returned an unusable answer, advancing"
                        );
                        continue;
                    }
                    info!(provider = provider.name(), "Provider answered");
                    return Ok(answer);
                }
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "Provider attempt failed");
                }
            }
        }

        warn!(fallback = %self.fallback_answer, "All providers exhausted, using fallback answer");
        Ok(self.fallback_answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedClient {
        answer: &'static str,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(answer: &'static str) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.to_string())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl LlmClient for FailingClient {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(AppError::LLMError("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_first_usable_answer_wins() {
        let client = FailoverClient::new(
            vec![Arc::new(ScriptedClient::new("Paris")), Arc::new(ScriptedClient::new("London"))],
            "42".to_string(),
        );

        assert_eq!(client.complete("capital of France?").await.unwrap(), "Paris");
    }

    #[tokio::test]
    async fn test_failed_provider_advances_to_next() {
        let client = FailoverClient::new(
            vec![Arc::new(FailingClient), Arc::new(ScriptedClient::new("Paris"))],
            "42".to_string(),
        );

        assert_eq!(client.complete("capital of France?").await.unwrap(), "Paris");
    }

    #[tokio::test]
    async fn test_unusable_answer_advances_to_next() {
        let client = FailoverClient::new(
            vec![
                Arc::new(ScriptedClient::new("error")),
                Arc::new(ScriptedClient::new("")),
                Arc::new(ScriptedClient::new("None")),
                Arc::new(ScriptedClient::new("Paris")),
            ],
            "42".to_string(),
        );

        assert_eq!(client.complete("capital of France?").await.unwrap(), "Paris");
    }

    #[tokio::test]
    async fn test_exhaustion_returns_fallback() {
        let client = FailoverClient::new(
            vec![Arc::new(FailingClient), Arc::new(ScriptedClient::new("error"))],
            "42".to_string(),
        );

        assert_eq!(client.complete("anything").await.unwrap(), "42");
    }

    #[tokio::test]
    async fn test_no_providers_returns_fallback() {
        let client = FailoverClient::new(Vec::new(), "42".to_string());

        assert_eq!(client.complete("anything").await.unwrap(), "42");
    }

    #[tokio::test]
    async fn test_answers_are_cleaned() {
        let client = FailoverClient::new(
            vec![Arc::new(ScriptedClient::new("\"Paris\"\n"))],
            "42".to_string(),
        );

        assert_eq!(client.complete("capital of France?").await.unwrap(), "Paris");
    }
}
