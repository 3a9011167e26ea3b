//! Upstream weather payloads, modelled only as far as rendering needs them

use serde::{Deserialize, Serialize};

/// Current conditions for one place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Place name
    pub name: String,
    pub sys: SystemInfo,
    pub main: MainReadings,
    /// Condition list; the first entry drives rendering
    pub weather: Vec<Condition>,
    /// Coordinates used for the follow-up forecast request
    #[serde(default)]
    pub coord: Option<Coord>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SystemInfo {
    /// Country code
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MainReadings {
    /// Temperature in Celsius
    pub temp: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Condition {
    /// Condition group, e.g. "Clouds"
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    /// Icon code, e.g. "04d"
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One three-hour forecast interval
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Unix timestamp (seconds)
    pub dt: i64,
    /// Text timestamp, e.g. "2024-05-01 12:00:00"
    pub dt_txt: String,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
}

/// Forecast payload; a missing `list` reads as an empty forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

impl WeatherSnapshot {
    /// First reported condition
    #[must_use]
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

impl ForecastEntry {
    #[must_use]
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}
