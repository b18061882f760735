use crate::application::use_cases::arithmetic::extract_arithmetic_answer;
use crate::domain::error::{AppError, Result};
use crate::domain::upload::UploadedFile;
use crate::infrastructure::csv::extract_answer;
use crate::infrastructure::llm_clients::LlmClient;
use std::sync::Arc;
use tracing::info;

/// Resolves a question to an answer by trying each strategy in fixed
/// priority order: uploaded file, local arithmetic, remote LLM. The LLM
/// client is expected to supply its own fallback on exhaustion, so a
/// well-formed request always resolves to some answer.
pub struct ResolveAnswerUseCase {
    llm_client: Arc<dyn LlmClient + Send + Sync>,
}

impl ResolveAnswerUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn execute(&self, question: &str, file: Option<UploadedFile>) -> Result<String> {
        let question = question.trim();

        if question.is_empty() && file.is_none() {
            return Err(AppError::ValidationError(
                "No question or file provided".to_string(),
            ));
        }

        // An uploaded file with an extractable answer wins outright; a
        // file that yields nothing falls through to the question.
        if let Some(file) = &file {
            if let Some(answer) = extract_answer(&file.content, &file.filename) {
                info!(filename = %file.filename, "Answer extracted from uploaded file");
                return Ok(answer);
            }
        }

        if let Some(answer) = extract_arithmetic_answer(question) {
            info!(answer = %answer, "Arithmetic answer computed");
            return Ok(answer);
        }

        let prompt = build_prompt(question);
        self.llm_client.complete(&prompt).await
    }
}

fn build_prompt(question: &str) -> String {
    format!(
        "You are a precise assistant. Answer the following question exactly as required. \
         Do not include any extra commentary; only provide the final answer.\n\n\
         Question: {}\nAnswer:",
        question
    )
}
