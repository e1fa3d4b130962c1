//! LLM client module
//!
//! Provides structured (schema-constrained JSON) generation requests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

mod error;
mod gemini;

pub use error::LlmError;
pub use gemini::GeminiClient;

/// One prompt plus the JSON schema the answer must follow
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Short task name used in logs, e.g. "itinerary"
    pub task: &'static str,
    /// Rendered prompt text
    pub prompt: String,
    /// OpenAPI-style response schema
    pub schema: Value,
}

/// A completion backend returning JSON constrained to a schema
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single attempt; the returned value is untrusted until decoded
    async fn generate(&self, request: GenerationRequest) -> Result<Value, LlmError>;
}

/// Generate and strictly decode the answer into `T`
pub async fn generate_structured<T: DeserializeOwned>(
    llm: &dyn LlmClient,
    request: GenerationRequest,
) -> Result<T, LlmError> {
    let task = request.task;
    debug!(task, prompt_len = request.prompt.len(), "generate_structured: called");

    let value = llm.generate(request).await?;
    if value.is_null() {
        return Err(LlmError::EmptyResponse);
    }

    serde_json::from_value(value).map_err(|e| {
        warn!(task, error = %e, "LLM output failed schema validation");
        LlmError::SchemaViolation(e.to_string())
    })
}
