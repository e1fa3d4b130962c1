//! `WanderWise` - AI travel planning
//!
//! This library orchestrates LLM generation and Google Maps Platform calls
//! into itineraries, place suggestions, packing lists, weather reports and
//! routes for a destination.

pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod google;
pub mod http;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::WanderWiseConfig;
pub use error::WanderWiseError;
pub use flows::{DirectionsError, RouteEnd, TripPlanner};
pub use google::{ApiError, GoogleMapsClient, MapsApi};
pub use llm::{GeminiClient, LlmClient, LlmError};
pub use models::{
    DirectionsResult, ItineraryResult, PackingList, PlaceSuggestions, TripPlan, TripRequest,
    WeatherAndAirQuality,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WanderWiseError>;
