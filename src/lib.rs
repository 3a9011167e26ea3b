//! `weather-mood` - current weather, a short forecast and ranked city suggestions
//!
//! This library provides the proxy client, the debounced and location-aware
//! suggestion engine, and the weather fetch controller behind the
//! `weather-mood` binary.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod geolocation;
pub mod location_cache;
pub mod logging;
pub mod models;
pub mod suggest;
pub mod weather;

// Re-export core types for public API
pub use api::ProxyClient;
pub use config::WeatherMoodConfig;
pub use error::WeatherMoodError;
pub use geolocation::{FixedPosition, Geolocator, PositionProvider};
pub use location_cache::LocationCache;
pub use models::{PlaceCandidate, UserLocation, WeatherSnapshot};
pub use suggest::{SuggestionEngine, SuggestionPresenter, SuggestionSource};
pub use weather::{LocateMode, WeatherController, WeatherPresenter, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherMoodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
