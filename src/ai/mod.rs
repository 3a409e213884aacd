//! Summary generation through an external LLM

pub mod client;
pub mod prompt;

use std::sync::Arc;

use tracing::{error, info};

use crate::core::models::{SummaryRequest, SummaryResult};
use crate::errors::SummarizeError;

pub use client::{CompletionClient, GeminiClient, OpenAiClient, estimate_tokens};
pub use prompt::{EMPHASIS_DELIMITER, build_prompt};

/// Turns extracted text into a summary. Holds the injected completion client;
/// nothing is cached, identical inputs query the provider again.
#[derive(Clone)]
pub struct SummaryRequester {
    client: Arc<dyn CompletionClient>,
}

impl SummaryRequester {
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `SummaryGenerationFailed` if the provider call fails or yields
    /// only whitespace.
    pub async fn summarize(&self, request: SummaryRequest) -> Result<SummaryResult, SummarizeError> {
        let text = prompt::sanitize_document_text(&request.text);
        let prompt = build_prompt(&text, request.length);
        info!(length = %request.length, prompt_chars = prompt.len(), "Generating summary");

        let raw = self.client.complete(&prompt).await?;
        let summary = raw.trim();
        if summary.is_empty() {
            error!("Provider returned an empty summary");
            return Err(SummarizeError::SummaryGenerationFailed(
                "empty summary returned".to_string(),
            ));
        }

        Ok(SummaryResult::new(summary))
    }
}
