//! Error types for the `WanderWise` service
//!
//! Upstream failures are not represented here: the orchestrators fold them
//! into each result's `error` field. What remains are the failures that stop
//! a request or the process itself.

use thiserror::Error;

use crate::prompts::PromptError;

#[derive(Error, Debug)]
pub enum WanderWiseError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Rejected user input
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Embedded prompt templates failed to compile
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl WanderWiseError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Message safe to show in the UI
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WanderWiseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            WanderWiseError::Validation { message } => format!("Invalid input: {message}"),
            WanderWiseError::Prompt(_) => {
                "The planner is not set up correctly. Please try again later.".to_string()
            }
        }
    }
}
