//! Place suggestions grouped by category

use serde::{Deserialize, Serialize};
use std::fmt;

/// A suggested hotel, restaurant or activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque Places photo reference; `None` when no photo was found
    #[serde(default)]
    pub photo_reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionCategory {
    Hotels,
    Restaurants,
    Activities,
}

impl SuggestionCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionCategory::Hotels => "hotels",
            SuggestionCategory::Restaurants => "restaurants",
            SuggestionCategory::Activities => "activities",
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggestions orchestrator output
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuggestions {
    pub hotels: Vec<PlaceSuggestion>,
    pub restaurants: Vec<PlaceSuggestion>,
    pub activities: Vec<PlaceSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaceSuggestions {
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty() && self.restaurants.is_empty() && self.activities.is_empty()
    }

    /// Total suggestions across all categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.hotels.len() + self.restaurants.len() + self.activities.len()
    }
}
