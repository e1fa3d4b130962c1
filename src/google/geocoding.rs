//! Address to coordinates through the Geocoding API

use tracing::{debug, instrument, warn};

use super::{ApiError, GoogleMapsClient, check_maps_status};
use crate::models::GeoPoint;

const SERVICE: &str = "Geocoding";

impl GoogleMapsClient {
    /// First match for `address`, `None` when the upstream has no result
    #[instrument(skip(self))]
    pub async fn geocode_address(&self, address: &str) -> Result<Option<GeoPoint>, ApiError> {
        let url = format!(
            "{}?address={}",
            self.config.geocoding_url,
            urlencoding::encode(address)
        );
        let response: wire::GeocodeResponse = self.get_json(SERVICE, &url).await?;

        if !check_maps_status(SERVICE, &response.status, response.error_message)? {
            warn!(address, status = %response.status, "no geocoding result");
            return Ok(None);
        }

        let point = response.results.into_iter().next().map(|result| {
            let location = result.geometry.location;
            GeoPoint::new(location.lat, location.lng)
        });
        if let Some(point) = &point {
            debug!(address, coordinates = %point.format_coordinates(), "geocoded");
        }
        Ok(point)
    }
}

mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResponse {
        pub status: String,
        #[serde(default)]
        pub results: Vec<GeocodeResult>,
        pub error_message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResult {
        pub geometry: Geometry,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub location: LatLng,
    }

    #[derive(Debug, Deserialize)]
    pub struct LatLng {
        pub lat: f64,
        pub lng: f64,
    }
}
