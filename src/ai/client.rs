//! LLM completion clients
//!
//! One synchronous (non-streaming) request per call. Provider failures are
//! logged here with full detail and surfaced as `SummaryGenerationFailed`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::core::config::{AppConfig, LlmProvider};
use crate::errors::SummarizeError;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Prompt in, generated text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError>;
}

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

fn http_client(timeout: Duration) -> Result<Client, SummarizeError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        error!("Failed to build HTTP client: {}", e);
        SummarizeError::InternalUnexpected(format!("Failed to build HTTP client: {e}"))
    })
}

/// Builds the configured provider's client once, for injection at startup.
///
/// # Errors
///
/// Returns `InternalUnexpected` if the HTTP client cannot be built.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn CompletionClient>, SummarizeError> {
    let client: Arc<dyn CompletionClient> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            config.llm_api_key.clone(),
            config.llm_model.clone(),
            config.llm_base_url.clone(),
            config.llm_timeout,
        )?),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(
            config.llm_api_key.clone(),
            config.openai_org_id.clone(),
            config.llm_model.clone(),
            config.llm_base_url.clone(),
            config.llm_timeout,
        )?),
    };
    Ok(client)
}

async fn read_success_json(
    provider: &str,
    response: reqwest::Response,
) -> Result<Value, SummarizeError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!(%status, "{} API error: {}", provider, error_text);
        return Err(SummarizeError::SummaryGenerationFailed(format!(
            "{provider} API returned {status}: {error_text}"
        )));
    }

    response.json().await.map_err(|e| {
        error!("Failed to parse {} response: {}", provider, e);
        SummarizeError::SummaryGenerationFailed(format!("Failed to parse {provider} response: {e}"))
    })
}

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns `InternalUnexpected` if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        model_name: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        Ok(Self {
            http: http_client(timeout)?,
            api_key,
            model_name,
            base_url: base_url
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn extract_text(body: &Value) -> Option<String> {
        let parts = body
            .get("candidates")?
            .as_array()?
            .first()?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let collected: Vec<&str> = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect();

        if collected.is_empty() {
            None
        } else {
            Some(collected.concat())
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        info!(
            model = %self.model_name,
            estimated_input_tokens = estimate_tokens(prompt),
            "Requesting Gemini completion"
        );

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );
        let request_body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                SummarizeError::SummaryGenerationFailed(format!("Gemini API request failed: {e}"))
            })?;

        let body = read_success_json("Gemini", response).await?;

        Self::extract_text(&body).ok_or_else(|| {
            error!("Gemini response carried no text: {}", body);
            SummarizeError::SummaryGenerationFailed("No text in Gemini response".to_string())
        })
    }
}

/// `OpenAI` Responses API client.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns `InternalUnexpected` if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        Ok(Self {
            http: http_client(timeout)?,
            api_key,
            org_id,
            model_name,
            base_url: base_url
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn extract_text(body: &Value) -> Option<String> {
        if let Some(text) = body.get("output_text").and_then(Value::as_str) {
            return Some(text.to_string());
        }

        let mut collected: Vec<String> = Vec::new();
        if let Some(items) = body.get("output").and_then(Value::as_array) {
            for item in items {
                let Some(parts) = item.get("content").and_then(Value::as_array) else {
                    continue;
                };
                for p in parts {
                    if p.get("type").and_then(Value::as_str) != Some("output_text") {
                        continue;
                    }
                    if let Some(s) = p.get("text").and_then(Value::as_str) {
                        collected.push(s.to_string());
                    } else if let Some(s) = p
                        .get("text")
                        .and_then(|t| t.get("value"))
                        .and_then(Value::as_str)
                    {
                        collected.push(s.to_string());
                    }
                }
            }
        }

        if collected.is_empty() {
            None
        } else {
            Some(collected.join("\n"))
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        #[cfg(feature = "debug-logs")]
        info!("Using OpenAI prompt:\n{}", prompt);

        info!(
            model = %self.model_name,
            estimated_input_tokens = estimate_tokens(prompt),
            "Requesting OpenAI completion"
        );

        let request_body = json!({
            "model": self.model_name,
            "input": [{ "role": "user", "content": prompt }],
        });

        let mut request = self
            .http
            .post(format!("{}/v1/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request.send().await.map_err(|e| {
            error!("OpenAI API request failed: {}", e);
            SummarizeError::SummaryGenerationFailed(format!("OpenAI API request failed: {e}"))
        })?;

        let body = read_success_json("OpenAI", response).await?;

        Self::extract_text(&body).ok_or_else(|| {
            error!("OpenAI response carried no text: {}", body);
            SummarizeError::SummaryGenerationFailed("No text in OpenAI response".to_string())
        })
    }
}
