//! Google Maps Platform adapters
//!
//! Thin wrappers translating the Geocoding, Weather, Air Quality, Places and
//! Directions HTTP APIs into the service's own data shapes. Each call makes
//! exactly one logical request (transport retries only when configured), checks
//! credentials before any I/O, and reports upstream "nothing found" as data
//! (`None` / [`ApiError::NoData`]) rather than as a transport failure.

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use reqwest::Response;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::GoogleConfig;
use crate::http;
use crate::models::{AirQuality, DailyForecast, DirectionsResult, GeoPoint};

mod air_quality;
mod directions;
pub mod error;
mod forecast;
mod geocoding;
mod places;

pub use error::ApiError;
pub use forecast::{MAX_FORECAST_DAYS, clamp_forecast_days};

/// Location services used by the orchestrators
#[async_trait]
pub trait MapsApi: Send + Sync {
    /// Resolve free text to coordinates; `Ok(None)` when nothing matches
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, ApiError>;

    /// Daily forecasts starting today, `days` clamped to 1-16
    async fn weather_forecast(&self, point: GeoPoint, days: u8)
    -> Result<Vec<DailyForecast>, ApiError>;

    /// Current air quality
    async fn air_quality(&self, point: GeoPoint) -> Result<AirQuality, ApiError>;

    /// Photo reference of the best text-search match; `Ok(None)` when no photo
    async fn find_place_photo(
        &self,
        query: &str,
        bias: Option<GeoPoint>,
    ) -> Result<Option<String>, ApiError>;

    /// Route between two resolved points
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResult, ApiError>;
}

/// Google Maps Platform client backed by one pooled HTTP client
pub struct GoogleMapsClient {
    http: ClientWithMiddleware,
    config: GoogleConfig,
}

impl GoogleMapsClient {
    /// Create a new client; a missing API key is reported per call, not here
    pub fn new(config: &GoogleConfig) -> AnyResult<Self> {
        let http = http::build_client(config.timeout_seconds, config.max_retries)?;
        if config.api_key.is_none() {
            warn!("GOOGLE_API_KEY is not configured; location services will report errors");
        }
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    fn api_key(&self, service: &'static str) -> Result<&str, ApiError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ApiError::Unconfigured { service })
    }

    /// Append the key after logging so it never shows up in traces
    fn with_key(url: &str, key: &str) -> String {
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}key={}", urlencoding::encode(key))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
    ) -> Result<T, ApiError> {
        let key = self.api_key(service)?;
        debug!(service, url, "GET");
        let start = Instant::now();

        let response = self.http.get(Self::with_key(url, key)).send().await?;
        Self::read_json(service, response, start).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        service: &'static str,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let key = self.api_key(service)?;
        debug!(service, url, "POST");
        let start = Instant::now();

        let response = self
            .http
            .post(Self::with_key(url, key))
            .json(body)
            .send()
            .await?;
        Self::read_json(service, response, start).await
    }

    async fn read_json<T: DeserializeOwned>(
        service: &'static str,
        response: Response,
        start: Instant,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        debug!(
            service,
            %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "response received"
        );

        if !status.is_success() {
            let message = serde_json::from_str::<wire::ErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|error| error.message)
                .unwrap_or(body);
            warn!(service, %status, %message, "upstream error");
            return Err(ApiError::Status {
                service,
                status: status.to_string(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
            service,
            message: e.to_string(),
        })
    }
}

/// Interpret the `status` field of the legacy Maps web services:
/// `Ok(true)` with data, `Ok(false)` for an empty answer, `Err` otherwise
fn check_maps_status(
    service: &'static str,
    status: &str,
    error_message: Option<String>,
) -> Result<bool, ApiError> {
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(false),
        other => Err(ApiError::Status {
            service,
            status: other.to_string(),
            message: error_message.unwrap_or_else(|| "no error message".to_string()),
        }),
    }
}

#[async_trait]
impl MapsApi for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, ApiError> {
        self.geocode_address(address).await
    }

    async fn weather_forecast(
        &self,
        point: GeoPoint,
        days: u8,
    ) -> Result<Vec<DailyForecast>, ApiError> {
        self.daily_forecast(point, days).await
    }

    async fn air_quality(&self, point: GeoPoint) -> Result<AirQuality, ApiError> {
        self.current_air_quality(point).await
    }

    async fn find_place_photo(
        &self,
        query: &str,
        bias: Option<GeoPoint>,
    ) -> Result<Option<String>, ApiError> {
        self.text_search_photo(query, bias).await
    }

    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResult, ApiError> {
        self.route(origin, destination).await
    }
}

/// Error body shared by the Google JSON APIs
mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ErrorEnvelope {
        pub error: Option<ErrorBody>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        pub message: Option<String>,
    }
}

#[cfg(test)]
pub mod mock {
    //! In-memory `MapsApi` for orchestrator tests

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct MockMaps {
        pub locations: HashMap<String, GeoPoint>,
        /// Addresses whose geocode call fails outright
        pub geocode_failures: Vec<String>,
        pub forecast: Option<Vec<DailyForecast>>,
        pub air_quality: Option<AirQuality>,
        /// Place name -> photo reference
        pub photos: HashMap<String, String>,
        /// Place names whose photo lookup fails
        pub photo_failures: Vec<String>,
        pub route: Option<DirectionsResult>,
        pub geocode_calls: AtomicUsize,
        pub photo_queries: Mutex<Vec<(String, Option<GeoPoint>)>>,
        photos_in_flight: AtomicUsize,
        photos_peak: AtomicUsize,
        pub forecast_days: Mutex<Vec<u8>>,
    }

    impl MockMaps {
        pub fn with_location(mut self, address: &str, lat: f64, lng: f64) -> Self {
            self.locations.insert(address.to_string(), GeoPoint::new(lat, lng));
            self
        }

        pub fn geocode_calls(&self) -> usize {
            self.geocode_calls.load(Ordering::SeqCst)
        }

        pub fn photo_queries(&self) -> Vec<(String, Option<GeoPoint>)> {
            self.photo_queries.lock().unwrap().clone()
        }

        /// Most photo lookups that were ever pending at the same time
        pub fn peak_concurrent_photo_lookups(&self) -> usize {
            self.photos_peak.load(Ordering::SeqCst)
        }
    }

    fn upstream_failure(service: &'static str) -> ApiError {
        ApiError::Status {
            service,
            status: "500 Internal Server Error".to_string(),
            message: "backend unavailable".to_string(),
        }
    }

    #[async_trait]
    impl MapsApi for MockMaps {
        async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, ApiError> {
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            if self.geocode_failures.iter().any(|a| a == address) {
                return Err(upstream_failure("Geocoding"));
            }
            Ok(self.locations.get(address).copied())
        }

        async fn weather_forecast(
            &self,
            _point: GeoPoint,
            days: u8,
        ) -> Result<Vec<DailyForecast>, ApiError> {
            self.forecast_days.lock().unwrap().push(days);
            self.forecast.clone().ok_or_else(|| upstream_failure("Weather"))
        }

        async fn air_quality(&self, _point: GeoPoint) -> Result<AirQuality, ApiError> {
            self.air_quality
                .clone()
                .ok_or_else(|| upstream_failure("Air Quality"))
        }

        async fn find_place_photo(
            &self,
            query: &str,
            bias: Option<GeoPoint>,
        ) -> Result<Option<String>, ApiError> {
            self.photo_queries
                .lock()
                .unwrap()
                .push((query.to_string(), bias));
            let pending = self.photos_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.photos_peak.fetch_max(pending, Ordering::SeqCst);
            // Give any sibling lookups a chance to start before this one finishes
            tokio::task::yield_now().await;
            self.photos_in_flight.fetch_sub(1, Ordering::SeqCst);

            let name = query.split(',').next().unwrap_or(query).trim();
            if self.photo_failures.iter().any(|n| n == name) {
                return Err(upstream_failure("Places"));
            }
            Ok(self.photos.get(name).cloned())
        }

        async fn directions(
            &self,
            _origin: GeoPoint,
            _destination: GeoPoint,
        ) -> Result<DirectionsResult, ApiError> {
            self.route
                .clone()
                .ok_or(ApiError::NoData { service: "Directions" })
        }
    }
}
