//! Daily forecasts through the Weather API

use tracing::{debug, instrument, warn};

use super::{ApiError, GoogleMapsClient};
use crate::models::{DailyForecast, GeoPoint};

const SERVICE: &str = "Weather";

/// Longest forecast horizon accepted by the upstream
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Clamp a requested horizon to 1..=16 days
#[must_use]
pub fn clamp_forecast_days(days: u8) -> u8 {
    days.clamp(1, MAX_FORECAST_DAYS)
}

impl GoogleMapsClient {
    /// Ordered daily forecasts starting today
    #[instrument(skip(self), fields(coordinates = %point.format_coordinates()))]
    pub async fn daily_forecast(
        &self,
        point: GeoPoint,
        days: u8,
    ) -> Result<Vec<DailyForecast>, ApiError> {
        let days = clamp_forecast_days(days);
        let url = format!(
            "{}/forecast/days:lookup?location.latitude={}&location.longitude={}&days={days}&pageSize={days}&languageCode=en",
            self.config.weather_url, point.lat, point.lng
        );
        let response: wire::ForecastResponse = self.get_json(SERVICE, &url).await?;

        if response.forecast_days.is_empty() {
            warn!("forecast response carried no days");
            return Err(ApiError::NoData { service: SERVICE });
        }

        let forecasts: Vec<DailyForecast> = response
            .forecast_days
            .into_iter()
            .map(DailyForecast::from)
            .collect();
        debug!(days = forecasts.len(), "forecast received");
        Ok(forecasts)
    }
}

impl From<wire::ForecastDay> for DailyForecast {
    fn from(day: wire::ForecastDay) -> Self {
        let condition = day
            .daytime_forecast
            .and_then(|forecast| forecast.weather_condition);
        let (description, icon_code) = match condition {
            Some(condition) => (
                condition.description.and_then(|d| d.text),
                condition.condition_type,
            ),
            None => (None, None),
        };

        Self {
            date: day.display_date.to_string(),
            min_temp_c: day.min_temperature.map_or(0.0, |t| t.degrees),
            max_temp_c: day.max_temperature.map_or(0.0, |t| t.degrees),
            condition: description.unwrap_or_else(|| "Not available".to_string()),
            icon_code,
        }
    }
}

mod wire {
    use chrono::NaiveDate;
    use serde::Deserialize;
    use std::fmt;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ForecastResponse {
        #[serde(default)]
        pub forecast_days: Vec<ForecastDay>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ForecastDay {
        pub display_date: DisplayDate,
        pub max_temperature: Option<Temperature>,
        pub min_temperature: Option<Temperature>,
        pub daytime_forecast: Option<DayPartForecast>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DisplayDate {
        pub year: i32,
        pub month: u32,
        pub day: u32,
    }

    impl fmt::Display for DisplayDate {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match NaiveDate::from_ymd_opt(self.year, self.month, self.day) {
                Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
                None => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct Temperature {
        pub degrees: f64,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DayPartForecast {
        pub weather_condition: Option<WeatherCondition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WeatherCondition {
        pub description: Option<LocalizedText>,
        #[serde(rename = "type")]
        pub condition_type: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct LocalizedText {
        pub text: Option<String>,
    }
}
