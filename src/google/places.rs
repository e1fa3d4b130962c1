//! Place photo lookup through Places Text Search

use tracing::{debug, instrument};

use super::{ApiError, GoogleMapsClient, check_maps_status};
use crate::models::GeoPoint;

const SERVICE: &str = "Places";

/// Search radius around the bias point, in meters
const BIAS_RADIUS_METERS: u32 = 50_000;

impl GoogleMapsClient {
    /// Photo reference of the first text-search match
    #[instrument(skip(self))]
    pub async fn text_search_photo(
        &self,
        query: &str,
        bias: Option<GeoPoint>,
    ) -> Result<Option<String>, ApiError> {
        let mut url = format!(
            "{}/textsearch/json?query={}",
            self.config.places_url,
            urlencoding::encode(query)
        );
        if let Some(point) = bias {
            url.push_str(&format!(
                "&location={}&radius={BIAS_RADIUS_METERS}",
                urlencoding::encode(&point.to_query_value())
            ));
        }
        let response: wire::TextSearchResponse = self.get_json(SERVICE, &url).await?;

        if !check_maps_status(SERVICE, &response.status, response.error_message)? {
            debug!(query, status = %response.status, "no place found");
            return Ok(None);
        }

        let photo_reference = response
            .results
            .into_iter()
            .next()
            .and_then(|place| place.photos.into_iter().next())
            .map(|photo| photo.photo_reference);
        if photo_reference.is_none() {
            debug!(query, "place has no photos");
        }
        Ok(photo_reference)
    }
}

mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct TextSearchResponse {
        pub status: String,
        #[serde(default)]
        pub results: Vec<Place>,
        pub error_message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Place {
        #[serde(default)]
        pub photos: Vec<Photo>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Photo {
        pub photo_reference: String,
    }
}
