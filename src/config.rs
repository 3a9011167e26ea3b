//! Configuration management for the weather-mood application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherMoodError;
use crate::models::UserLocation;
use crate::suggest::ranking::{
    DEFAULT_NAME_WEIGHT, DEFAULT_PROXIMITY_SCALE_KM, DEFAULT_PROXIMITY_WEIGHT, RankingWeights,
};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the weather-mood application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherMoodConfig {
    /// Weather proxy configuration
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Suggestion input handling
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    /// Hybrid ranking constants
    #[serde(default)]
    pub ranking: RankingConfig,
    /// Geolocation configuration
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// Forecast rendering policy
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather proxy configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Base URL of the proxy endpoint
    #[serde(default = "default_proxy_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_proxy_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Suggestion input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Quiescence window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Minimum significant characters before a lookup is scheduled
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

/// Hybrid ranking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_name_weight")]
    pub name_weight: f64,
    #[serde(default = "default_proximity_weight")]
    pub proximity_weight: f64,
    /// Distance at which the proximity score halves
    #[serde(default = "default_proximity_scale")]
    pub proximity_scale_km: f64,
}

/// Geolocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Acquisition timeout in seconds
    #[serde(default = "default_geolocation_timeout")]
    pub timeout_seconds: u32,
    /// Fixed latitude reported by the position provider
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Fixed longitude reported by the position provider
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Attempt a silent lookup when an interactive session starts
    #[serde(default = "default_locate_on_start")]
    pub locate_on_start: bool,
}

/// Forecast rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Maximum number of daily cards
    #[serde(default = "default_forecast_days")]
    pub max_days: usize,
    /// Timestamp fragment selecting one entry per day
    #[serde(default = "default_noon_marker")]
    pub noon_marker: String,
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
}

// Default value functions
fn default_proxy_base_url() -> String {
    "http://localhost:3000/api/weather".to_string()
}

fn default_proxy_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("weather-mood/{}", crate::VERSION)
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_chars() -> usize {
    2
}

fn default_name_weight() -> f64 {
    DEFAULT_NAME_WEIGHT
}

fn default_proximity_weight() -> f64 {
    DEFAULT_PROXIMITY_WEIGHT
}

fn default_proximity_scale() -> f64 {
    DEFAULT_PROXIMITY_SCALE_KM
}

fn default_geolocation_timeout() -> u32 {
    10
}

fn default_locate_on_start() -> bool {
    true
}

fn default_forecast_days() -> usize {
    5
}

fn default_noon_marker() -> String {
    "12:00:00".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_proxy_base_url(),
            timeout_seconds: default_proxy_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            name_weight: default_name_weight(),
            proximity_weight: default_proximity_weight(),
            proximity_scale_km: default_proximity_scale(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_geolocation_timeout(),
            latitude: None,
            longitude: None,
            locate_on_start: default_locate_on_start(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_days: default_forecast_days(),
            noon_marker: default_noon_marker(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ProxyConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl SuggestionConfig {
    #[must_use]
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl RankingConfig {
    #[must_use]
    pub fn weights(&self) -> RankingWeights {
        RankingWeights {
            name_weight: self.name_weight,
            proximity_weight: self.proximity_weight,
            proximity_scale_km: self.proximity_scale_km,
        }
    }
}

impl GeolocationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }

    /// Configured fixed position, if both coordinates are present
    #[must_use]
    pub fn fixed_position(&self) -> Option<UserLocation> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(UserLocation::new(latitude, longitude)),
            _ => None,
        }
    }
}

impl WeatherMoodConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERMOOD_PROXY__BASE_URL -> proxy.base_url
        builder = builder.add_source(
            Environment::with_prefix("WEATHERMOOD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherMoodConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-mood").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.proxy.base_url.is_empty() {
            self.proxy.base_url = default_proxy_base_url();
        }
        if self.proxy.timeout_seconds == 0 {
            self.proxy.timeout_seconds = default_proxy_timeout();
        }
        if self.proxy.user_agent.is_empty() {
            self.proxy.user_agent = default_user_agent();
        }
        if self.suggestions.min_query_chars == 0 {
            self.suggestions.min_query_chars = default_min_query_chars();
        }
        if self.geolocation.timeout_seconds == 0 {
            self.geolocation.timeout_seconds = default_geolocation_timeout();
        }
        if self.forecast.max_days == 0 {
            self.forecast.max_days = default_forecast_days();
        }
        if self.forecast.noon_marker.is_empty() {
            self.forecast.noon_marker = default_noon_marker();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_ranking()?;
        self.validate_geolocation()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.proxy.timeout_seconds > 300 {
            return Err(
                WeatherMoodError::config("Proxy timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.suggestions.debounce_ms > 5000 {
            return Err(WeatherMoodError::config("Debounce window cannot exceed 5000 ms").into());
        }

        if self.geolocation.timeout_seconds > 120 {
            return Err(
                WeatherMoodError::config("Geolocation timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.forecast.max_days > 8 {
            return Err(WeatherMoodError::config("Forecast cannot exceed 8 days").into());
        }

        Ok(())
    }

    /// Validate the hybrid ranking constants
    fn validate_ranking(&self) -> Result<()> {
        let ranking = &self.ranking;
        for (name, weight) in [
            ("name_weight", ranking.name_weight),
            ("proximity_weight", ranking.proximity_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(WeatherMoodError::config(format!(
                    "Ranking {name} must be between 0 and 1, got: {weight}"
                ))
                .into());
            }
        }

        if (ranking.name_weight + ranking.proximity_weight - 1.0).abs() > 1e-6 {
            return Err(WeatherMoodError::config("Ranking weights must sum to 1").into());
        }

        if !(ranking.proximity_scale_km.is_finite() && ranking.proximity_scale_km > 0.0) {
            return Err(
                WeatherMoodError::config("Proximity scale must be a positive distance").into(),
            );
        }

        Ok(())
    }

    fn validate_geolocation(&self) -> Result<()> {
        let geo = &self.geolocation;
        if geo.latitude.is_some() != geo.longitude.is_some() {
            return Err(WeatherMoodError::config(
                "Geolocation latitude and longitude must be set together",
            )
            .into());
        }

        if let Some(lat) = geo.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(WeatherMoodError::config(format!(
                    "Latitude must be between -90 and 90, got: {lat}"
                ))
                .into());
            }
        }

        if let Some(lon) = geo.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(WeatherMoodError::config(format!(
                    "Longitude must be between -180 and 180, got: {lon}"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherMoodError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherMoodError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.proxy.base_url.starts_with("http://")
            && !self.proxy.base_url.starts_with("https://")
        {
            return Err(WeatherMoodError::config(
                "Proxy base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WeatherMoodConfig::default();
        assert_eq!(config.proxy.base_url, "http://localhost:3000/api/weather");
        assert_eq!(config.proxy.timeout_seconds, 30);
        assert_eq!(config.suggestions.debounce_ms, 300);
        assert_eq!(config.suggestions.min_query_chars, 2);
        assert_eq!(config.ranking.name_weight, 0.6);
        assert_eq!(config.ranking.proximity_weight, 0.4);
        assert_eq!(config.ranking.proximity_scale_km, 500.0);
        assert_eq!(config.geolocation.timeout_seconds, 10);
        assert_eq!(config.forecast.max_days, 5);
        assert_eq!(config.forecast.noon_marker, "12:00:00");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherMoodConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WeatherMoodConfig::default();
        config.proxy.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout cannot exceed")
        );
    }

    #[test]
    fn test_config_validation_weights_must_sum_to_one() {
        let mut config = WeatherMoodConfig::default();
        config.ranking.name_weight = 0.7;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("sum to 1"));

        config.ranking.proximity_weight = 0.3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_proximity_scale() {
        let mut config = WeatherMoodConfig::default();
        config.ranking.proximity_scale_km = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_half_position() {
        let mut config = WeatherMoodConfig::default();
        config.geolocation.latitude = Some(51.5);
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("set together"));

        config.geolocation.longitude = Some(-0.1);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.geolocation.fixed_position(),
            Some(UserLocation::new(51.5, -0.1))
        );
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = WeatherMoodConfig::default();
        config.proxy.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = WeatherMoodConfig::default();
        config.proxy.base_url.clear();
        config.forecast.max_days = 0;
        config.apply_defaults();
        assert_eq!(config.proxy.base_url, "http://localhost:3000/api/weather");
        assert_eq!(config.forecast.max_days, 5);
    }

    #[test]
    fn test_weights_from_config() {
        let weights = WeatherMoodConfig::default().ranking.weights();
        assert_eq!(weights, RankingWeights::default());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WeatherMoodConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weather-mood"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
