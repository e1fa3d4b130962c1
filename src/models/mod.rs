//! Data models for the WanderWise service
//!
//! Plain request/response records, organized by concern:
//! - Trip: the user's request and the combined plan
//! - Itinerary: day-by-day schedules
//! - Suggestions: hotels, restaurants and activities
//! - Packing: the fixed-size packing list
//! - Location / Weather / Directions: data produced by the Google adapters
//!
//! Every aggregate result carries an optional `error` so callers can render
//! partial data next to what went wrong.

pub mod directions;
pub mod itinerary;
pub mod location;
pub mod packing;
pub mod suggestions;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use directions::{DirectionsResult, DirectionsSummary};
pub use itinerary::{Activity, DayItinerary, DayLabel, ItineraryResult};
pub use location::GeoPoint;
pub use packing::{PackingList, PackingListItem, PackingListRequest};
pub use suggestions::{PlaceSuggestion, PlaceSuggestions, SuggestionCategory};
pub use trip::{TripPlan, TripRequest};
pub use weather::{AirQuality, DailyForecast, WeatherAndAirQuality, WeatherRequest};
