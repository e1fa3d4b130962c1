//! Hotel, restaurant and activity suggestions with place photos

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::TripPlanner;
use crate::models::{GeoPoint, PlaceSuggestion, PlaceSuggestions, SuggestionCategory, TripRequest};
use crate::prompts::{self, schemas};

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestions {
    hotels: Vec<RawPlace>,
    restaurants: Vec<RawPlace>,
    activities: Vec<RawPlace>,
}

impl TripPlanner {
    /// Suggestions from the LLM, each enriched with a photo reference when one exists
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn suggest_places(&self, request: &TripRequest) -> PlaceSuggestions {
        let context = json!({
            "destination": request.destination,
            "budget": request.budget_display(),
            "interests": request.interest_list().join(", "),
        });

        // The bias point is only a search hint, so it is resolved alongside generation
        let (generated, bias) = futures::join!(
            self.generate::<RawSuggestions, _>(prompts::SUGGESTIONS, &context, schemas::suggestions()),
            self.photo_bias(&request.destination),
        );

        let raw = match generated {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    error = %e,
                    schema_violation = e.is_schema_violation(),
                    "suggestion generation failed"
                );
                return PlaceSuggestions::failed(format!("Could not generate suggestions. {e}"));
            }
        };

        let destination = request.destination.as_str();
        let (hotels, restaurants, activities) = futures::join!(
            self.with_photos(SuggestionCategory::Hotels, raw.hotels, destination, bias),
            self.with_photos(SuggestionCategory::Restaurants, raw.restaurants, destination, bias),
            self.with_photos(SuggestionCategory::Activities, raw.activities, destination, bias),
        );

        let suggestions = PlaceSuggestions {
            hotels,
            restaurants,
            activities,
            error: None,
        };
        info!(count = suggestions.len(), "suggestions generated");
        suggestions
    }

    async fn photo_bias(&self, destination: &str) -> Option<GeoPoint> {
        match self.maps.geocode(destination).await {
            Ok(point) => point,
            Err(e) => {
                debug!(error = %e, "photo search runs without location bias");
                None
            }
        }
    }

    /// One lookup at a time within a category to keep the photo API load flat
    async fn with_photos(
        &self,
        category: SuggestionCategory,
        places: Vec<RawPlace>,
        destination: &str,
        bias: Option<GeoPoint>,
    ) -> Vec<PlaceSuggestion> {
        let mut suggestions = Vec::with_capacity(places.len());

        for place in places {
            let name = place.name.trim();
            if name.is_empty() {
                warn!(%category, "skipping unnamed suggestion");
                continue;
            }

            let query = format!("{name}, {destination}");
            let photo_reference = match self.maps.find_place_photo(&query, bias).await {
                Ok(reference) => reference,
                Err(e) => {
                    warn!(%category, place = name, error = %e, "photo lookup failed");
                    None
                }
            };

            suggestions.push(PlaceSuggestion {
                name: name.to_string(),
                description: place.description,
                photo_reference,
            });
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::fixtures::planner;
    use crate::google::mock::MockMaps;
    use crate::llm::mock::MockLlm;

    fn request() -> TripRequest {
        TripRequest::new("Kyoto, Japan", 1500.0, "temples, ramen")
    }

    fn llm() -> MockLlm {
        MockLlm::new().respond(
            "suggestions",
            json!({
                "hotels": [ { "name": "Hotel Kanra", "description": "Modern ryokan-style rooms." } ],
                "restaurants": [
                    { "name": "Menya Inoichi", "description": "Dashi-forward ramen." },
                    { "name": "Honke Daiichi-Asahi" }
                ],
                "activities": [ { "name": "Fushimi Inari Taisha" }, { "name": "  " } ]
            }),
        )
    }

    #[tokio::test]
    async fn test_suggestions_with_photos() {
        let mut maps = MockMaps::default().with_location("Kyoto, Japan", 35.0116, 135.7681);
        maps.photos.insert("Hotel Kanra".to_string(), "photo-kanra".to_string());
        maps.photos.insert("Fushimi Inari Taisha".to_string(), "photo-inari".to_string());
        let (planner, _, maps) = planner(llm(), maps);

        let result = planner.suggest_places(&request()).await;

        assert!(result.error.is_none());
        assert_eq!(result.hotels[0].photo_reference.as_deref(), Some("photo-kanra"));
        assert_eq!(result.restaurants.len(), 2);
        assert!(result.restaurants[1].photo_reference.is_none());
        assert!(result.restaurants[1].description.is_none());
        // Blank names are dropped
        assert_eq!(result.activities.len(), 1);
        assert_eq!(result.activities[0].photo_reference.as_deref(), Some("photo-inari"));

        let queries = maps.photo_queries();
        assert_eq!(queries.len(), 4);
        assert!(queries.iter().any(|(q, _)| q == "Menya Inoichi, Kyoto, Japan"));
        assert!(
            queries
                .iter()
                .all(|(_, bias)| *bias == Some(GeoPoint::new(35.0116, 135.7681)))
        );
    }

    #[tokio::test]
    async fn test_photo_lookups_run_one_at_a_time_within_a_category() {
        let llm = MockLlm::new().respond(
            "suggestions",
            json!({
                "hotels": [],
                "restaurants": [
                    { "name": "Menya Inoichi" },
                    { "name": "Honke Daiichi-Asahi" },
                    { "name": "Ramen Sen no Kaze" }
                ],
                "activities": []
            }),
        );
        let (planner, _, maps) = planner(llm, MockMaps::default());

        let result = planner.suggest_places(&request()).await;

        assert_eq!(result.restaurants.len(), 3);
        assert_eq!(maps.peak_concurrent_photo_lookups(), 1);
        let queries: Vec<String> = maps.photo_queries().into_iter().map(|(q, _)| q).collect();
        assert_eq!(
            queries,
            vec![
                "Menya Inoichi, Kyoto, Japan",
                "Honke Daiichi-Asahi, Kyoto, Japan",
                "Ramen Sen no Kaze, Kyoto, Japan",
            ]
        );
    }

    #[tokio::test]
    async fn test_categories_are_looked_up_concurrently() {
        let (planner, _, maps) = planner(llm(), MockMaps::default());

        planner.suggest_places(&request()).await;

        assert!(maps.peak_concurrent_photo_lookups() > 1);
    }

    #[tokio::test]
    async fn test_photo_failure_degrades_to_no_photo() {
        let mut maps = MockMaps::default();
        maps.photos.insert("Menya Inoichi".to_string(), "photo-ramen".to_string());
        maps.photo_failures.push("Hotel Kanra".to_string());
        let (planner, _, _) = planner(llm(), maps);

        let result = planner.suggest_places(&request()).await;

        assert!(result.error.is_none());
        assert_eq!(result.hotels.len(), 1);
        assert!(result.hotels[0].photo_reference.is_none());
        assert_eq!(result.restaurants[0].photo_reference.as_deref(), Some("photo-ramen"));
    }

    #[tokio::test]
    async fn test_geocode_failure_searches_without_bias() {
        let mut maps = MockMaps::default();
        maps.geocode_failures.push("Kyoto, Japan".to_string());
        let (planner, _, maps) = planner(llm(), maps);

        let result = planner.suggest_places(&request()).await;

        assert_eq!(result.len(), 4);
        assert!(maps.photo_queries().iter().all(|(_, bias)| bias.is_none()));
    }

    #[tokio::test]
    async fn test_llm_failure_skips_photo_lookups() {
        let (planner, _, maps) = planner(MockLlm::new(), MockMaps::default());

        let result = planner.suggest_places(&request()).await;

        assert!(result.is_empty());
        assert!(result.error.is_some());
        assert!(maps.photo_queries().is_empty());
    }
}
