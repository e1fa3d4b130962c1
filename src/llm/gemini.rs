//! Gemini `generateContent` client
//!
//! Requests JSON output constrained by `responseSchema` and returns the
//! parsed JSON of the first candidate.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::{GenerationRequest, LlmClient, LlmError};
use crate::config::LlmConfig;
use crate::http;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
pub struct GeminiClient {
    http: ClientWithMiddleware,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from configuration; a missing key is reported per call
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = http::build_client(config.timeout_seconds, 0)?;
        if config.api_key.is_none() {
            warn!("LLM API key is not configured; generation requests will report errors");
        }

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for the Gemini API
    fn build_request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "contents": [
                { "role": "user", "parts": [ { "text": request.prompt } ] }
            ],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens,
                "responseMimeType": "application/json",
                "responseSchema": request.schema,
            }
        })
    }
}

/// Pull the JSON answer out of a `generateContent` response
fn extract_json(response: wire::GenerateContentResponse) -> Result<Value, LlmError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(LlmError::Blocked(reason));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return match candidate.finish_reason.as_deref() {
            Some("STOP") | None => Err(LlmError::EmptyResponse),
            Some(reason) => Err(LlmError::Blocked(reason.to_string())),
        };
    }

    serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| LlmError::SchemaViolation(format!("response is not valid JSON: {e}")))
}

/// Some models still wrap JSON in a markdown fence
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[instrument(skip(self, request), fields(task = request.task, model = %self.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<Value, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::Unconfigured)?;
        let body = self.build_request_body(&request);
        let start = Instant::now();

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(%status, elapsed_ms = start.elapsed().as_millis() as u64, "generateContent returned");

        if !status.is_success() {
            let message = serde_json::from_str::<wire::ErrorEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|error| error.message)
                .unwrap_or(text);
            warn!(%status, %message, "LLM API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: wire::GenerateContentResponse = serde_json::from_str(&text)?;
        let value = extract_json(response)?;
        info!(
            task = request.task,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generation complete"
        );
        Ok(value)
    }
}

mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
        pub prompt_feedback: Option<PromptFeedback>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Candidate {
        pub content: Option<Content>,
        pub finish_reason: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Content {
        #[serde(default)]
        pub parts: Vec<Part>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Part {
        pub text: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PromptFeedback {
        pub block_reason: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorEnvelope {
        pub error: Option<ErrorBody>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        pub message: String,
    }
}
