//! Configuration management for the `WanderWise` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.
//!
//! Missing API credentials are deliberately not a validation failure: the
//! service still starts, and every call that needs the credential returns a
//! typed "unconfigured" error instead.

use crate::WanderWiseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `WanderWise` service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderWiseConfig {
    /// Google Maps Platform configuration
    pub google: GoogleConfig,
    /// LLM completion configuration
    pub llm: LlmConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Default request settings
    pub defaults: DefaultsConfig,
}

/// Google Maps Platform settings shared by all location adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// API key used for geocoding, weather, air quality, places and directions
    pub api_key: Option<String>,
    /// Geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Weather API base URL
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Air Quality API base URL
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,
    /// Places API base URL
    #[serde(default = "default_places_url")]
    pub places_url: String,
    /// Directions endpoint
    #[serde(default = "default_directions_url")]
    pub directions_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_google_timeout")]
    pub timeout_seconds: u32,
    /// Retries for transient failures (0 = single attempt)
    #[serde(default)]
    pub max_retries: u32,
}

/// LLM completion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Generative Language API base URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Sampling temperature (0.0-2.0)
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens per call
    #[serde(default = "default_llm_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP collector base URL; export is disabled when unset
    pub otlp_endpoint: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Default request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Forecast days when a weather request does not specify them
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

// Default value functions
fn default_geocoding_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_weather_url() -> String {
    "https://weather.googleapis.com/v1".to_string()
}

fn default_air_quality_url() -> String {
    "https://airquality.googleapis.com/v1".to_string()
}

fn default_places_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_directions_url() -> String {
    "https://maps.googleapis.com/maps/api/directions/json".to_string()
}

fn default_google_timeout() -> u32 {
    30
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_llm_temperature() -> f32 {
    0.7
}

fn default_llm_max_output_tokens() -> u32 {
    8192
}

fn default_llm_timeout() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_forecast_days() -> u8 {
    7
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocoding_url: default_geocoding_url(),
            weather_url: default_weather_url(),
            air_quality_url: default_air_quality_url(),
            places_url: default_places_url(),
            directions_url: default_directions_url(),
            timeout_seconds: default_google_timeout(),
            max_retries: 0,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            max_output_tokens: default_llm_max_output_tokens(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for WanderWiseConfig {
    fn default() -> Self {
        Self {
            google: GoogleConfig::default(),
            llm: LlmConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl WanderWiseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var("WANDERWISE_CONFIG").ok().map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WANDERWISE_GOOGLE__API_KEY -> google.api_key
        builder = builder.add_source(
            Environment::with_prefix("WANDERWISE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WanderWiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_credential_fallbacks(|name| std::env::var(name).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wanderwise").join("config.toml"))
    }

    /// Fill missing credentials from the conventional provider variables
    /// (`GOOGLE_API_KEY`, `GOOGLE_GENAI_API_KEY`, `GEMINI_API_KEY`)
    pub fn apply_credential_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup_non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.google.api_key.is_none() {
            self.google.api_key = lookup_non_empty("GOOGLE_API_KEY");
        }
        if self.llm.api_key.is_none() {
            self.llm.api_key =
                lookup_non_empty("GOOGLE_GENAI_API_KEY").or_else(|| lookup_non_empty("GEMINI_API_KEY"));
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.google.geocoding_url.is_empty() {
            self.google.geocoding_url = default_geocoding_url();
        }
        if self.google.weather_url.is_empty() {
            self.google.weather_url = default_weather_url();
        }
        if self.google.air_quality_url.is_empty() {
            self.google.air_quality_url = default_air_quality_url();
        }
        if self.google.places_url.is_empty() {
            self.google.places_url = default_places_url();
        }
        if self.google.directions_url.is_empty() {
            self.google.directions_url = default_directions_url();
        }
        if self.google.timeout_seconds == 0 {
            self.google.timeout_seconds = default_google_timeout();
        }
        if self.llm.base_url.is_empty() {
            self.llm.base_url = default_llm_base_url();
        }
        if self.llm.model.is_empty() {
            self.llm.model = default_llm_model();
        }
        if self.llm.max_output_tokens == 0 {
            self.llm.max_output_tokens = default_llm_max_output_tokens();
        }
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_llm_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.max_body_bytes == 0 {
            self.server.max_body_bytes = default_max_body_bytes();
        }
        if self.defaults.forecast_days == 0 {
            self.defaults.forecast_days = default_forecast_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys that were provided; absent keys are allowed
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("Google API key", &self.google.api_key),
            ("LLM API key", &self.llm.api_key),
        ];

        for (label, key) in keys {
            if let Some(key) = key {
                if key.trim().is_empty() {
                    return Err(WanderWiseError::config(format!(
                        "{label} cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }

                if key.len() > 200 {
                    return Err(WanderWiseError::config(format!(
                        "{label} appears to be invalid (too long). Please check your API key."
                    ))
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.google.timeout_seconds > 300 || self.llm.timeout_seconds > 300 {
            return Err(WanderWiseError::config("Request timeout cannot exceed 300 seconds").into());
        }

        if self.google.max_retries > 10 {
            return Err(WanderWiseError::config("Google API max retries cannot exceed 10").into());
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(WanderWiseError::config("LLM temperature must be between 0.0 and 2.0").into());
        }

        if !(1..=16).contains(&self.defaults.forecast_days) {
            return Err(WanderWiseError::config("Default forecast days must be between 1 and 16").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WanderWiseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WanderWiseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("google.geocoding_url", &self.google.geocoding_url),
            ("google.weather_url", &self.google.weather_url),
            ("google.air_quality_url", &self.google.air_quality_url),
            ("google.places_url", &self.google.places_url),
            ("google.directions_url", &self.google.directions_url),
            ("llm.base_url", &self.llm.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WanderWiseError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if let Some(endpoint) = &self.logging.otlp_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(WanderWiseError::config(
                    "logging.otlp_endpoint must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = WanderWiseConfig::default();
        assert_eq!(
            config.google.geocoding_url,
            "https://maps.googleapis.com/maps/api/geocode/json"
        );
        assert_eq!(config.google.timeout_seconds, 30);
        assert_eq!(config.google.max_retries, 0);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.forecast_days, 7);
        assert!(config.google.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        // Credentials are optional at load time; calls degrade instead
        let config = WanderWiseConfig::default();
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let mut config = WanderWiseConfig::default();
        config.google.api_key = Some("  ".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WanderWiseConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WanderWiseConfig::default();
        config.google.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = WanderWiseConfig::default();
        config.defaults.forecast_days = 17;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_urls() {
        let mut config = WanderWiseConfig::default();
        config.google.weather_url = "ftp://weather.example".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("google.weather_url"));
    }

    #[test]
    fn test_apply_defaults_repairs_zero_values() {
        let mut config = WanderWiseConfig::default();
        config.google.timeout_seconds = 0;
        config.defaults.forecast_days = 0;
        config.llm.model.clear();
        config.apply_defaults();
        assert_eq!(config.google.timeout_seconds, 30);
        assert_eq!(config.defaults.forecast_days, 7);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_credential_fallbacks() {
        let env: HashMap<&str, &str> =
            HashMap::from([("GOOGLE_API_KEY", "maps-key"), ("GEMINI_API_KEY", "gemini-key")]);
        let mut config = WanderWiseConfig::default();
        config.apply_credential_fallbacks(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.google.api_key.as_deref(), Some("maps-key"));
        assert_eq!(config.llm.api_key.as_deref(), Some("gemini-key"));
    }

    #[test]
    fn test_credential_fallbacks_keep_explicit_keys() {
        let mut config = WanderWiseConfig::default();
        config.google.api_key = Some("explicit".to_string());
        config.apply_credential_fallbacks(|_| Some(String::new()));

        assert_eq!(config.google.api_key.as_deref(), Some("explicit"));
        // Blank fallbacks are ignored
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WanderWiseConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("wanderwise"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
