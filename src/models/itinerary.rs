//! Day-by-day itinerary records

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Day identifier as the generator produced it: `1` or `"Arrival Day"`
///
/// Numeric text such as `"1"` decodes as a number, since schema-constrained
/// answers carry every day as a string.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DayLabel {
    Number(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for DayLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(day) => DayLabel::Number(day),
            Raw::Text(text) => match text.trim().parse() {
                Ok(day) => DayLabel::Number(day),
                Err(_) => DayLabel::Text(text),
            },
        })
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayLabel::Number(day) => write!(f, "Day {day}"),
            DayLabel::Text(text) => write!(f, "{text}"),
        }
    }
}

/// One planned activity within a day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Street address, used to route between adjacent activities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A single day of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    pub day: DayLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_day_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_notes: Option<String>,
}

impl DayItinerary {
    /// At least one activity, and every activity says what to do
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.activities.is_empty()
            && self
                .activities
                .iter()
                .all(|activity| !activity.description.trim().is_empty())
    }
}

/// Itinerary orchestrator output; `itinerary` is empty rather than absent on failure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    pub itinerary: Vec<DayItinerary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItineraryResult {
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            itinerary: Vec::new(),
            error: Some(error.into()),
        }
    }
}
