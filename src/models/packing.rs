//! Packing list records

use serde::{Deserialize, Serialize};

use crate::{Result, WanderWiseError};

/// One item on the packing list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackingListItem {
    pub name: String,
    /// Why this item matters for this particular trip
    pub reason: String,
    /// Icon name for the presentation layer (e.g. "Umbrella")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_hint: Option<String>,
    /// Search query for buying the item online
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_query: Option<String>,
}

impl PackingListItem {
    #[must_use]
    pub fn new(
        name: &str,
        reason: &str,
        icon_hint: Option<&str>,
        shopping_query: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
            icon_hint: icon_hint.map(str::to_string),
            shopping_query: shopping_query.map(str::to_string),
        }
    }
}

/// Inputs for the packing list generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackingListRequest {
    pub destination: String,
    pub interests: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_days: Option<u32>,
    /// e.g. "Warm and sunny", "Cool with chances of rain"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_summary: Option<String>,
}

impl PackingListRequest {
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().chars().count() < 2 {
            return Err(WanderWiseError::validation(
                "Destination must be at least 2 characters.",
            ));
        }
        if self.interests.trim().is_empty() {
            return Err(WanderWiseError::validation("Interests cannot be empty."));
        }
        if self.number_of_days == Some(0) {
            return Err(WanderWiseError::validation(
                "Number of days must be a positive number.",
            ));
        }
        Ok(())
    }
}

/// Packing list orchestrator output; always exactly `PACKING_LIST_SIZE` items
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    pub items: Vec<PackingListItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
