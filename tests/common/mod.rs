//! Local stand-in for the Google Maps Platform and Gemini endpoints

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use wanderwise::config::{GoogleConfig, LlmConfig};

pub const API_KEY: &str = "test-google-key";
pub const LLM_KEY: &str = "test-llm-key";

/// Places the fake geocoder knows about
pub const KNOWN_PLACES: &[(&str, f64, f64)] = &[
    ("Kyoto, Japan", 35.0116, 135.7681),
    ("Kyoto Station", 34.9858, 135.7588),
    ("Kinkaku-ji", 35.0394, 135.7292),
];

#[derive(Clone, Default)]
pub struct Recorder {
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn record(&self, entry: impl Into<String>) {
        self.requests.lock().unwrap().push(entry.into());
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.starts_with(prefix))
            .count()
    }

    pub fn entries(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub recorder: Recorder,
}

impl MockServer {
    pub async fn start() -> Self {
        let recorder = Recorder::default();
        let app = Router::new()
            .route("/geocode/json", get(geocode))
            .route("/weather/forecast/days:lookup", get(forecast))
            .route("/airquality/currentConditions:lookup", post(air_quality))
            .route("/place/textsearch/json", get(text_search))
            .route("/directions/json", get(directions))
            .route("/llm/models/{call}", post(generate_content))
            .with_state(recorder.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, recorder }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn google_config(&self) -> GoogleConfig {
        let base = self.base_url();
        GoogleConfig {
            api_key: Some(API_KEY.to_string()),
            geocoding_url: format!("{base}/geocode/json"),
            weather_url: format!("{base}/weather"),
            air_quality_url: format!("{base}/airquality"),
            places_url: format!("{base}/place"),
            directions_url: format!("{base}/directions/json"),
            timeout_seconds: 5,
            max_retries: 0,
        }
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: Some(LLM_KEY.to_string()),
            base_url: format!("{}/llm", self.base_url()),
            timeout_seconds: 5,
            ..LlmConfig::default()
        }
    }
}

fn denied() -> Response {
    Json(json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid."
    }))
    .into_response()
}

fn has_valid_key(query: &HashMap<String, String>) -> bool {
    query.get("key").map(String::as_str) == Some(API_KEY)
}

fn known_place(name: &str) -> Option<(f64, f64)> {
    KNOWN_PLACES
        .iter()
        .find(|(place, _, _)| *place == name)
        .map(|&(_, lat, lng)| (lat, lng))
}

async fn geocode(
    State(recorder): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let address = query.get("address").cloned().unwrap_or_default();
    recorder.record(format!("geocode {address}"));
    if !has_valid_key(&query) {
        return denied();
    }

    match known_place(&address) {
        Some((lat, lng)) => Json(json!({
            "status": "OK",
            "results": [ { "geometry": { "location": { "lat": lat, "lng": lng } } } ]
        }))
        .into_response(),
        None => Json(json!({ "status": "ZERO_RESULTS", "results": [] })).into_response(),
    }
}

async fn forecast(
    State(recorder): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let days: u32 = query
        .get("days")
        .and_then(|d| d.parse().ok())
        .unwrap_or(0);
    recorder.record(format!("forecast days={days}"));
    if !has_valid_key(&query) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": { "code": 403, "message": "API key not valid." } })),
        )
            .into_response();
    }

    let forecast_days: Vec<Value> = (0..days)
        .map(|offset| {
            json!({
                "displayDate": { "year": 2026, "month": 10, "day": 16 + offset },
                "maxTemperature": { "degrees": 21.0 + offset as f64, "unit": "CELSIUS" },
                "minTemperature": { "degrees": 12.0, "unit": "CELSIUS" },
                "daytimeForecast": {
                    "weatherCondition": {
                        "description": { "text": "Mostly sunny", "languageCode": "en" },
                        "type": "MOSTLY_CLEAR"
                    }
                }
            })
        })
        .collect();
    Json(json!({ "forecastDays": forecast_days })).into_response()
}

async fn air_quality(
    State(recorder): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    recorder.record(format!(
        "air_quality {},{}",
        body["location"]["latitude"], body["location"]["longitude"]
    ));
    if !has_valid_key(&query) {
        return StatusCode::FORBIDDEN.into_response();
    }

    // Simulate an outage for one location
    if body["location"]["latitude"].as_f64() == Some(34.9858) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": { "code": 503, "message": "The service is currently unavailable." } })),
        )
            .into_response();
    }

    Json(json!({
        "indexes": [
            { "code": "uaqi", "displayName": "Universal AQI", "aqi": 68, "category": "Good air quality", "dominantPollutant": "pm25" },
            { "code": "jpn_aqi", "displayName": "AQI (JP)", "aqi": 25, "category": "Good" }
        ],
        "healthRecommendations": {
            "generalPopulation": "With this level of air quality, you have no limitations."
        }
    }))
    .into_response()
}

async fn text_search(
    State(recorder): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let text = query.get("query").cloned().unwrap_or_default();
    let location = query.get("location").cloned().unwrap_or_default();
    recorder.record(format!("textsearch {text} @ {location}"));
    if !has_valid_key(&query) {
        return denied();
    }

    if text.starts_with("Unknown") {
        return Json(json!({ "status": "ZERO_RESULTS", "results": [] })).into_response();
    }
    let reference = format!("photo-{}", text.split(',').next().unwrap_or_default().replace(' ', "-"));
    Json(json!({
        "status": "OK",
        "results": [ { "name": text, "photos": [ { "photo_reference": reference } ] } ]
    }))
    .into_response()
}

async fn directions(
    State(recorder): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let origin = query.get("origin").cloned().unwrap_or_default();
    let destination = query.get("destination").cloned().unwrap_or_default();
    recorder.record(format!("directions {origin} -> {destination}"));
    if !has_valid_key(&query) {
        return denied();
    }

    Json(json!({
        "status": "OK",
        "routes": [{
            "legs": [{
                "distance": { "text": "9.1 km", "value": 9100 },
                "duration": { "text": "25 mins", "value": 1500 }
            }],
            "overview_polyline": { "points": "u{~vFvyys@fS]" }
        }]
    }))
    .into_response()
}

/// Picks a canned answer by looking at what the prompt asks for
async fn generate_content(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    recorder.record("llm");

    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(LLM_KEY) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "API key not valid. Please pass a valid API key." } })),
        )
            .into_response();
    }
    if body["generationConfig"]["responseMimeType"] != "application/json" {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let answer = if prompt.contains("day-wise itinerary") {
        json!({
            "itinerary": [
                {
                    "day": 1,
                    "theme": "Temples of Higashiyama",
                    "activities": [
                        { "time": "8:00 AM", "description": "Kiyomizu-dera at opening", "address": "Kyoto Station" },
                        { "time": "1:00 PM", "description": "Ramen at Menya Inoichi", "address": "Kinkaku-ji" }
                    ]
                },
                { "day": "Day 2", "activities": [ { "description": "Fushimi Inari hike" } ] }
            ]
        })
    } else if prompt.contains("hotels, restaurants and activities") {
        json!({
            "hotels": [ { "name": "Hotel Kanra", "description": "Modern ryokan-style rooms." } ],
            "restaurants": [ { "name": "Menya Inoichi" }, { "name": "Unknown Noodle Bar" } ],
            "activities": [ { "name": "Fushimi Inari Taisha" } ]
        })
    } else if prompt.contains("pack smart") {
        json!({
            "items": [
                { "name": "Rain Jacket", "reason": "Autumn showers are common.", "iconHint": "Umbrella" },
                { "name": "Slip-on Shoes", "reason": "Temples ask you to remove shoes." }
            ]
        })
    } else {
        json!({})
    };

    Json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [ { "text": answer.to_string() } ] },
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}
