//! Weather forecast and air quality records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Forecast for a single day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Minimum temperature in Celsius
    pub min_temp_c: f64,
    /// Maximum temperature in Celsius
    pub max_temp_c: f64,
    /// Human-readable description of weather conditions
    pub condition: String,
    /// Upstream condition code, e.g. `PARTLY_CLOUDY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_code: Option<String>,
}

/// Current air quality at a point
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirQuality {
    pub aqi: i32,
    /// e.g. "Good air quality"
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_pollutant: Option<String>,
    /// Index attribution, e.g. "Universal AQI"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Health advice keyed by population group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<BTreeMap<String, String>>,
}

/// Weather request for a destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRequest {
    pub destination: String,
    /// Forecast days (1-16); the configured default is used when absent
    #[serde(default)]
    pub days: Option<u8>,
}

/// Merged weather and air quality result; either half may be missing
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAndAirQuality {
    pub destination: String,
    pub forecasts: Option<Vec<DailyForecast>>,
    pub air_quality: Option<AirQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WeatherAndAirQuality {
    /// Result for a destination whose coordinates could not be resolved
    #[must_use]
    pub fn unresolved(destination: &str, error: impl Into<String>) -> Self {
        Self {
            destination: destination.to_string(),
            forecasts: None,
            air_quality: None,
            error: Some(error.into()),
        }
    }
}
