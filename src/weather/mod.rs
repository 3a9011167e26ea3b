use async_trait::async_trait;

use crate::models::{ForecastEntry, WeatherSnapshot};
use crate::{Result, WeatherMoodError};

pub mod controller;
pub mod forecast;

pub use controller::{ControllerState, LocateMode, WeatherController, WeatherPresenter};
pub use forecast::{CurrentView, ForecastCard, current_view, forecast_cards, select_daily};

/// Message shown when a search is submitted without a city
pub const EMPTY_CITY_MESSAGE: &str = "Enter a city name";

/// Upstream current-conditions and forecast lookups
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot>;

    async fn current_by_coords(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot>;

    /// Three-hour forecast intervals as delivered upstream
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastEntry>>;
}

/// Trim a submitted city name, rejecting blank input
pub fn validate_city(city: &str) -> Result<&str> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherMoodError::input_invalid(EMPTY_CITY_MESSAGE));
    }
    Ok(city)
}
