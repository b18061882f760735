use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    HuggingFace,
    OpenRouter,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::OpenRouter => "openrouter",
        }
    }
}

/// Static description of one completion endpoint. Built once at startup
/// from `AppConfig` and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub base_url: String,
    pub model: String,
    /// Bearer credential. `None` sends an unauthenticated request and
    /// lets the provider decide whether to reject it.
    pub api_key: Option<String>,
}
