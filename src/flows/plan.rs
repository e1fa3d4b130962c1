//! Itinerary and suggestions for one request, generated together

use tracing::instrument;

use super::TripPlanner;
use crate::models::{TripPlan, TripRequest};

impl TripPlanner {
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn plan_trip(&self, request: &TripRequest) -> TripPlan {
        let (itinerary, suggestions) = futures::join!(
            self.generate_itinerary(request),
            self.suggest_places(request),
        );

        TripPlan {
            request: request.clone(),
            itinerary,
            suggestions,
        }
    }
}
