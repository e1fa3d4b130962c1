//! Trip planning orchestrators
//!
//! Each operation coordinates one or more LLM and Google calls into a single
//! UI-ready result. Upstream failures never escape as `Err`: they are folded
//! into the result's `error` field next to whatever partial data was obtained.
//! The one exception is [`TripPlanner::directions`], whose typed error tells
//! the caller which end of the route failed.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::config::DefaultsConfig;
use crate::google::MapsApi;
use crate::llm::{self, GenerationRequest, LlmClient, LlmError};
use crate::prompts::{PromptError, PromptLibrary};

mod directions;
mod itinerary;
mod packing;
mod plan;
mod suggestions;
mod weather;

pub use directions::{DirectionsError, RouteEnd};
pub use packing::{FALLBACK_ITEMS, PACKING_LIST_SIZE, normalize_packing_list};

/// Failure to obtain a structured answer for a generation task
#[derive(Debug, Error)]
enum GenerationError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl GenerationError {
    /// The model answered, but the answer was unusable
    fn is_schema_violation(&self) -> bool {
        matches!(self, GenerationError::Llm(e) if e.is_schema_violation())
    }
}

/// Orchestrates the LLM and location services for one deployment
pub struct TripPlanner {
    llm: Arc<dyn LlmClient>,
    maps: Arc<dyn MapsApi>,
    prompts: PromptLibrary,
    default_forecast_days: u8,
}

impl TripPlanner {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        maps: Arc<dyn MapsApi>,
        defaults: &DefaultsConfig,
    ) -> crate::Result<Self> {
        Ok(Self {
            llm,
            maps,
            prompts: PromptLibrary::new()?,
            default_forecast_days: defaults.forecast_days,
        })
    }

    /// Render `template`, ask for `schema`, decode strictly into `T`
    async fn generate<T, C>(
        &self,
        task: &'static str,
        context: &C,
        schema: Value,
    ) -> Result<T, GenerationError>
    where
        T: DeserializeOwned,
        C: Serialize,
    {
        let prompt = self.prompts.render(task, context)?;
        let request = GenerationRequest {
            task,
            prompt,
            schema,
        };
        Ok(llm::generate_structured(self.llm.as_ref(), request).await?)
    }
}
