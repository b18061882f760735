use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::application::ResolveAnswerUseCase;
use crate::domain::provider::{ProviderKind, ProviderSettings};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::{
    FailoverClient, HuggingFaceClient, LlmClient, OpenRouterClient,
};
use crate::interfaces;

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::load()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))?;

    let timeout = Duration::from_secs(config.llm_timeout_secs);

    let hugging_face = HuggingFaceClient::new(
        ProviderSettings {
            kind: ProviderKind::HuggingFace,
            base_url: config.hf_base_url.clone(),
            model: config.hf_model.clone(),
            api_key: config.hf_token.clone(),
        },
        timeout,
    );
    let openrouter = OpenRouterClient::new(
        ProviderSettings {
            kind: ProviderKind::OpenRouter,
            base_url: config.openrouter_base_url.clone(),
            model: config.openrouter_model.clone(),
            api_key: config.openrouter_api_key.clone(),
        },
        config.openrouter_referer.clone(),
        config.openrouter_title.clone(),
        timeout,
    );

    let providers: Vec<Arc<dyn LlmClient + Send + Sync>> =
        vec![Arc::new(hugging_face), Arc::new(openrouter)];
    let llm_client = Arc::new(FailoverClient::new(
        providers,
        config.fallback_answer.clone(),
    ));

    let resolve_use_case = ResolveAnswerUseCase::new(llm_client);

    info!(host = %config.host, port = config.port, "Starting HTTP server");
    let server = interfaces::http::start_server(&config, resolve_use_case)?;
    server.await
}
