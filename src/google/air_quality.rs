//! Current conditions through the Air Quality API

use serde_json::json;
use tracing::{debug, instrument, warn};

use super::{ApiError, GoogleMapsClient};
use crate::models::{AirQuality, GeoPoint};

const SERVICE: &str = "Air Quality";
const UNIVERSAL_INDEX: &str = "uaqi";

impl GoogleMapsClient {
    /// Current index at `point`, preferring the Universal AQI
    #[instrument(skip(self), fields(coordinates = %point.format_coordinates()))]
    pub async fn current_air_quality(&self, point: GeoPoint) -> Result<AirQuality, ApiError> {
        let url = format!("{}/currentConditions:lookup", self.config.air_quality_url);
        let body = json!({
            "location": { "latitude": point.lat, "longitude": point.lng },
            "extraComputations": ["HEALTH_RECOMMENDATIONS", "DOMINANT_POLLUTANT_CONCENTRATION"],
            "languageCode": "en",
        });
        let response: wire::CurrentConditions = self.post_json(SERVICE, &url, &body).await?;

        let air_quality = AirQuality::try_from(response)?;
        debug!(aqi = air_quality.aqi, category = %air_quality.category, "air quality received");
        Ok(air_quality)
    }
}

impl TryFrom<wire::CurrentConditions> for AirQuality {
    type Error = ApiError;

    fn try_from(response: wire::CurrentConditions) -> Result<Self, Self::Error> {
        let mut indexes = response.indexes;
        let position = indexes
            .iter()
            .position(|index| index.code == UNIVERSAL_INDEX)
            .unwrap_or(0);
        if indexes.is_empty() {
            warn!("air quality response carried no indexes");
            return Err(ApiError::NoData { service: SERVICE });
        }
        let index = indexes.swap_remove(position);

        // Attribution names the data provider; the index name only stands in for it
        let source = response
            .sources
            .into_iter()
            .next()
            .map(|s| s.name)
            .or(index.display_name)
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Self {
            aqi: index.aqi,
            category: index.category,
            dominant_pollutant: index.dominant_pollutant,
            source: Some(source),
            recommendations: response
                .health_recommendations
                .filter(|recommendations| !recommendations.is_empty()),
        })
    }
}

mod wire {
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CurrentConditions {
        #[serde(default)]
        pub indexes: Vec<AqiIndex>,
        #[serde(default)]
        pub sources: Vec<Source>,
        pub health_recommendations: Option<BTreeMap<String, String>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AqiIndex {
        pub code: String,
        pub display_name: Option<String>,
        pub aqi: i32,
        #[serde(default)]
        pub category: String,
        pub dominant_pollutant: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Source {
        pub name: String,
    }
}
