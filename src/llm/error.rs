//! LLM error types

use thiserror::Error;

/// Errors that can occur during a structured generation call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM API key is not configured (set GOOGLE_GENAI_API_KEY or GEMINI_API_KEY)")]
    Unconfigured,

    #[error("LLM API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("LLM response was blocked: {0}")]
    Blocked(String),

    #[error("LLM returned an empty response")]
    EmptyResponse,

    #[error("LLM response does not match the expected structure: {0}")]
    SchemaViolation(String),

    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Network error: {0:#}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// The model answered, but not with the requested shape
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            LlmError::SchemaViolation(_) | LlmError::EmptyResponse | LlmError::Blocked(_)
        )
    }
}
