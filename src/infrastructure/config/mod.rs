use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Process-wide configuration. Built once at startup from defaults plus
/// `ANSWERBRIDGE_*` environment overrides, then shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Answer returned when every resolution strategy has failed.
    pub fallback_answer: String,
    /// Per-attempt timeout for each provider call, in seconds.
    pub llm_timeout_secs: u64,

    pub hf_base_url: String,
    pub hf_model: String,
    pub hf_token: Option<String>,

    pub openrouter_base_url: String,
    pub openrouter_model: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_referer: String,
    pub openrouter_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            fallback_answer: "42".to_string(),
            llm_timeout_secs: 25,
            hf_base_url: "https://api-inference.huggingface.co/models".to_string(),
            hf_model: "distilgpt2".to_string(),
            hf_token: None,
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
            openrouter_model: "mistralai/mistral-7b-instruct".to_string(),
            openrouter_api_key: None,
            openrouter_referer: "http://localhost:5000".to_string(),
            openrouter_title: "answerbridge".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Env::prefixed("ANSWERBRIDGE_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))?;

        // Credentials are also honored under their conventional names.
        if config.hf_token.is_none() {
            config.hf_token = std::env::var("HF_TOKEN").ok().filter(|v| !v.is_empty());
        }
        if config.openrouter_api_key.is_none() {
            config.openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|v| !v.is_empty());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.fallback_answer, "42");
        assert_eq!(config.llm_timeout_secs, 25);
        assert!(config.hf_token.is_none());
    }
}
