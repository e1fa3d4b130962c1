//! Route between two points

use serde::{Deserialize, Serialize};

/// Route returned by the directions adapter
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsResult {
    /// e.g. "15 mins (7.5 km)"
    pub summary: String,
    pub distance: String,
    pub duration: String,
    /// Encoded polyline of the whole route
    pub overview_polyline: String,
}

/// Directions rendered for a UI: whatever is known, plus the failure if any
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsSummary {
    pub summary: Option<String>,
    pub distance: Option<String>,
    pub duration: Option<String>,
    pub overview_polyline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<E: std::fmt::Display> From<Result<DirectionsResult, E>> for DirectionsSummary {
    fn from(result: Result<DirectionsResult, E>) -> Self {
        match result {
            Ok(route) => Self {
                summary: Some(route.summary),
                distance: Some(route.distance),
                duration: Some(route.duration),
                overview_polyline: Some(route.overview_polyline),
                error: None,
            },
            Err(err) => Self {
                error: Some(err.to_string()),
                ..Self::default()
            },
        }
    }
}
