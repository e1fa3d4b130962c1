//! Routes through the Directions API

use tracing::{debug, instrument, warn};

use super::{ApiError, GoogleMapsClient, check_maps_status};
use crate::models::{DirectionsResult, GeoPoint};

const SERVICE: &str = "Directions";
const NOT_AVAILABLE: &str = "N/A";

impl GoogleMapsClient {
    /// First route's first leg between two resolved points
    #[instrument(skip(self), fields(
        origin = %origin.format_coordinates(),
        destination = %destination.format_coordinates(),
    ))]
    pub async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResult, ApiError> {
        let url = format!(
            "{}?origin={}&destination={}",
            self.config.directions_url,
            urlencoding::encode(&origin.to_query_value()),
            urlencoding::encode(&destination.to_query_value())
        );
        let response: wire::DirectionsResponse = self.get_json(SERVICE, &url).await?;

        if !check_maps_status(SERVICE, &response.status, response.error_message)? {
            warn!(status = %response.status, "no route found");
            return Err(ApiError::NoData { service: SERVICE });
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(ApiError::NoData { service: SERVICE })?;
        let result = DirectionsResult::try_from(route)?;
        debug!(summary = %result.summary, "route received");
        Ok(result)
    }
}

impl TryFrom<wire::Route> for DirectionsResult {
    type Error = ApiError;

    fn try_from(route: wire::Route) -> Result<Self, Self::Error> {
        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or(ApiError::NoData { service: SERVICE })?;
        let overview_polyline = route
            .overview_polyline
            .map(|polyline| polyline.points)
            .filter(|points| !points.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse {
                service: SERVICE,
                message: "route has no overview polyline".to_string(),
            })?;

        let distance = leg
            .distance
            .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.text);
        let duration = leg
            .duration
            .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.text);

        Ok(Self {
            summary: format!("{duration} ({distance})"),
            distance,
            duration,
            overview_polyline,
        })
    }
}

mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct DirectionsResponse {
        pub status: String,
        #[serde(default)]
        pub routes: Vec<Route>,
        pub error_message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Route {
        #[serde(default)]
        pub legs: Vec<Leg>,
        pub overview_polyline: Option<Polyline>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Leg {
        pub distance: Option<TextValue>,
        pub duration: Option<TextValue>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TextValue {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Polyline {
        pub points: String,
    }
}
