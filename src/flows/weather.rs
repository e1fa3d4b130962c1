//! Weather forecast and air quality for a destination

use tracing::{info, instrument, warn};

use super::TripPlanner;
use crate::google::clamp_forecast_days;
use crate::models::WeatherAndAirQuality;

impl TripPlanner {
    /// Geocode, then fetch forecast and air quality concurrently
    ///
    /// A failing branch leaves its field `None` and adds a sentence to
    /// `error`; the other branch is unaffected.
    #[instrument(skip(self))]
    pub async fn weather_and_air_quality(
        &self,
        destination: &str,
        days: Option<u8>,
    ) -> WeatherAndAirQuality {
        let point = match self.maps.geocode(destination).await {
            Ok(Some(point)) => point,
            Ok(None) => {
                warn!("destination could not be geocoded");
                return WeatherAndAirQuality::unresolved(
                    destination,
                    format!("Could not find coordinates for {destination}."),
                );
            }
            Err(e) => {
                warn!(error = %e, "geocoding failed");
                return WeatherAndAirQuality::unresolved(
                    destination,
                    format!("Could not find coordinates for {destination}. {e}"),
                );
            }
        };

        let days = clamp_forecast_days(days.unwrap_or(self.default_forecast_days));
        let (forecasts, air_quality) = futures::join!(
            self.maps.weather_forecast(point, days),
            self.maps.air_quality(point),
        );

        let mut errors = Vec::new();
        let forecasts = match forecasts {
            Ok(forecasts) => Some(forecasts),
            Err(e) => {
                warn!(error = %e, "weather forecast failed");
                errors.push(format!("Failed to fetch weather. {e}"));
                None
            }
        };
        let air_quality = match air_quality {
            Ok(air_quality) => Some(air_quality),
            Err(e) => {
                warn!(error = %e, "air quality failed");
                errors.push(format!("Failed to fetch air quality. {e}"));
                None
            }
        };

        info!(
            forecast = forecasts.is_some(),
            air_quality = air_quality.is_some(),
            "weather and air quality fetched"
        );

        WeatherAndAirQuality {
            destination: destination.to_string(),
            forecasts,
            air_quality,
            error: (!errors.is_empty()).then(|| errors.join(" ")),
        }
    }
}
