//! JSON API over the trip planning orchestrators
//!
//! Request validation failures are answered with 400 and `{"error": ..}`.
//! Everything else is 200: upstream failures travel in each result's own
//! `error` field.

use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::flows::TripPlanner;
use crate::google::MAX_FORECAST_DAYS;
use crate::models::{
    DirectionsSummary, ItineraryResult, PackingList, PackingListRequest, PlaceSuggestions,
    TripPlan, TripRequest, WeatherAndAirQuality, WeatherRequest,
};
use crate::{VERSION, WanderWiseError};

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
}

/// Error response carrying a UI-safe message
#[derive(Debug)]
pub struct ApiFailure(WanderWiseError);

impl From<WanderWiseError> for ApiFailure {
    fn from(error: WanderWiseError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        Self(WanderWiseError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match self.0 {
            WanderWiseError::Validation { .. } => StatusCode::BAD_REQUEST,
            WanderWiseError::Config { .. } | WanderWiseError::Prompt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        warn!(%status, error = %self.0, "request rejected");
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiFailure>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itinerary", post(itinerary))
        .route("/suggestions", post(suggestions))
        .route("/packing-list", post(packing_list))
        .route("/weather", post(weather))
        .route("/directions", post(directions))
        .route("/plan", post(plan))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

async fn itinerary(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> ApiResult<ItineraryResult> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(Json(state.planner.generate_itinerary(&request).await))
}

async fn suggestions(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> ApiResult<PlaceSuggestions> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(Json(state.planner.suggest_places(&request).await))
}

async fn packing_list(
    State(state): State<AppState>,
    payload: Result<Json<PackingListRequest>, JsonRejection>,
) -> ApiResult<PackingList> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(Json(state.planner.generate_packing_list(&request).await))
}

async fn weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherRequest>, JsonRejection>,
) -> ApiResult<WeatherAndAirQuality> {
    let Json(request) = payload?;
    if request.destination.trim().is_empty() {
        return Err(WanderWiseError::validation("Destination cannot be empty.").into());
    }
    if let Some(days) = request.days
        && !(1..=MAX_FORECAST_DAYS).contains(&days)
    {
        return Err(WanderWiseError::validation(format!(
            "Forecast days must be between 1 and {MAX_FORECAST_DAYS}."
        ))
        .into());
    }
    Ok(Json(
        state
            .planner
            .weather_and_air_quality(request.destination.trim(), request.days)
            .await,
    ))
}

async fn directions(
    State(state): State<AppState>,
    payload: Result<Json<DirectionsRequest>, JsonRejection>,
) -> ApiResult<DirectionsSummary> {
    let Json(request) = payload?;
    let result = state
        .planner
        .directions(&request.origin, &request.destination)
        .await;
    Ok(Json(DirectionsSummary::from(result)))
}

async fn plan(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> ApiResult<TripPlan> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(Json(state.planner.plan_trip(&request).await))
}
