//! Trip request submitted by the user and the combined plan returned for it

use serde::{Deserialize, Serialize};

use super::{ItineraryResult, PlaceSuggestions};
use crate::{Result, WanderWiseError};

/// Destination, budget (USD) and free-text interests for one submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    pub budget: f64,
    /// Comma-separated interests, e.g. "temples, ramen"
    pub interests: String,
}

impl TripRequest {
    pub fn new(destination: impl Into<String>, budget: f64, interests: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            budget,
            interests: interests.into(),
        }
    }

    /// Reject requests the generators cannot do anything useful with
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().chars().count() < 2 {
            return Err(WanderWiseError::validation(
                "Destination must be at least 2 characters.",
            ));
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(WanderWiseError::validation("Budget must be a positive number."));
        }
        if self.interests.trim().chars().count() < 3 {
            return Err(WanderWiseError::validation(
                "Interests must be at least 3 characters.",
            ));
        }
        Ok(())
    }

    /// Individual interests, trimmed, empties dropped
    #[must_use]
    pub fn interest_list(&self) -> Vec<&str> {
        self.interests
            .split(',')
            .map(str::trim)
            .filter(|interest| !interest.is_empty())
            .collect()
    }

    /// Budget rendered for prompts, e.g. `$1500` or `$799.50`
    #[must_use]
    pub fn budget_display(&self) -> String {
        if self.budget.fract() == 0.0 {
            format!("${:.0}", self.budget)
        } else {
            format!("${:.2}", self.budget)
        }
    }
}

/// Itinerary and place suggestions generated together for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub request: TripRequest,
    pub itinerary: ItineraryResult,
    pub suggestions: PlaceSuggestions,
}
