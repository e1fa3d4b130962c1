//! Day-by-day itinerary generation

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::TripPlanner;
use crate::models::{DayItinerary, ItineraryResult, TripRequest};
use crate::prompts::{self, schemas};

/// Days are decoded one by one so a single malformed day does not sink the rest
#[derive(Debug, Deserialize)]
struct RawItinerary {
    itinerary: Vec<Value>,
}

impl TripPlanner {
    /// Ordered days for the request; empty (never absent) when generation fails
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn generate_itinerary(&self, request: &TripRequest) -> ItineraryResult {
        let context = json!({
            "destination": request.destination,
            "budget": request.budget_display(),
            "interests": request.interest_list().join(", "),
        });

        let raw: RawItinerary = match self
            .generate(prompts::ITINERARY, &context, schemas::itinerary())
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    error = %e,
                    schema_violation = e.is_schema_violation(),
                    "itinerary generation failed"
                );
                return ItineraryResult::failed(format!("Could not generate an itinerary. {e}"));
            }
        };

        let generated = raw.itinerary.len();
        let itinerary = well_formed_days(raw.itinerary);
        info!(days = itinerary.len(), "itinerary generated");

        if itinerary.is_empty() {
            let reason = if generated == 0 {
                "The generator returned no days."
            } else {
                "None of the generated days could be used."
            };
            return ItineraryResult::failed(format!("Could not generate an itinerary. {reason}"));
        }

        ItineraryResult {
            itinerary,
            error: None,
        }
    }
}

fn well_formed_days(days: Vec<Value>) -> Vec<DayItinerary> {
    days.into_iter()
        .enumerate()
        .filter_map(|(index, day)| match serde_json::from_value::<DayItinerary>(day) {
            Ok(day) if day.is_well_formed() => Some(day),
            Ok(_) => {
                warn!(index, "dropping day without usable activities");
                None
            }
            Err(e) => {
                warn!(index, error = %e, "dropping malformed day");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::fixtures::planner;
    use crate::google::mock::MockMaps;
    use crate::llm::mock::MockLlm;
    use crate::models::DayLabel;

    fn kyoto() -> TripRequest {
        TripRequest::new("Kyoto, Japan", 1500.0, "temples, ramen")
    }

    #[tokio::test]
    async fn test_kyoto_itinerary() {
        let llm = MockLlm::new().respond(
            "itinerary",
            json!({
                "itinerary": [
                    {
                        "day": 1,
                        "theme": "Eastern Kyoto",
                        "activities": [
                            { "time": "8:00 AM", "description": "Kiyomizu-dera at opening", "cost": "¥400", "address": "1-294 Kiyomizu, Higashiyama Ward, Kyoto" },
                            { "time": "12:30 PM", "description": "Ramen lunch at Menya Inoichi" }
                        ],
                        "estimatedDayCost": "¥6000"
                    },
                    {
                        "day": "Day 2",
                        "activities": [ { "description": "Fushimi Inari hike to the summit" } ]
                    }
                ]
            }),
        );
        let (planner, llm, _) = planner(llm, MockMaps::default());

        let result = planner.generate_itinerary(&kyoto()).await;

        assert!(result.error.is_none());
        assert_eq!(result.itinerary.len(), 2);
        assert_eq!(result.itinerary[0].day, DayLabel::Number(1));
        assert_eq!(result.itinerary[1].day, DayLabel::Text("Day 2".to_string()));
        for day in &result.itinerary {
            assert!(!day.activities.is_empty());
            assert!(day.activities.iter().all(|a| !a.description.is_empty()));
        }

        let prompt = llm.prompt_for("itinerary").unwrap();
        assert!(prompt.contains("Kyoto, Japan"));
        assert!(prompt.contains("$1500"));
        assert!(prompt.contains("temples, ramen"));
    }

    #[tokio::test]
    async fn test_prompt_lists_interests_cleanly() {
        let (planner, llm, _) = planner(MockLlm::new(), MockMaps::default());
        let request = TripRequest::new("Kyoto, Japan", 1500.0, " temples ,, ramen, ");

        planner.generate_itinerary(&request).await;

        let prompt = llm.prompt_for("itinerary").unwrap();
        assert!(prompt.contains("interested in temples, ramen."));
    }

    #[tokio::test]
    async fn test_malformed_days_are_dropped() {
        let llm = MockLlm::new().respond(
            "itinerary",
            json!({
                "itinerary": [
                    { "day": 1, "activities": [] },
                    { "day": 2, "summary": "no activities key" },
                    { "day": 3, "activities": [ { "description": "Philosopher's Path walk" } ] }
                ]
            }),
        );
        let (planner, _, _) = planner(llm, MockMaps::default());

        let result = planner.generate_itinerary(&kyoto()).await;
        assert_eq!(result.itinerary.len(), 1);
        assert_eq!(result.itinerary[0].day, DayLabel::Number(3));
    }

    #[tokio::test]
    async fn test_schema_violation_yields_empty_itinerary() {
        let llm = MockLlm::new().respond("itinerary", json!({ "days": "three" }));
        let (planner, _, _) = planner(llm, MockMaps::default());

        let result = planner.generate_itinerary(&kyoto()).await;
        assert!(result.itinerary.is_empty());
        assert!(result.error.unwrap().contains("does not match"));
    }

    #[tokio::test]
    async fn test_llm_failure_yields_empty_itinerary() {
        let (planner, llm, _) = planner(MockLlm::new(), MockMaps::default());

        let result = planner.generate_itinerary(&kyoto()).await;
        assert!(result.itinerary.is_empty());
        assert!(result.error.is_some());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_itinerary_is_reported() {
        let llm = MockLlm::new().respond("itinerary", json!({ "itinerary": [] }));
        let (planner, _, _) = planner(llm, MockMaps::default());

        let result = planner.generate_itinerary(&kyoto()).await;
        assert!(result.itinerary.is_empty());
        assert!(result.error.unwrap().contains("no days"));
    }
}
