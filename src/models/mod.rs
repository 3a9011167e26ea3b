//! Data models for the weather-mood application
//!
//! This module contains the core domain models organized by concern:
//! - Place: suggestion candidates and the user's coordinates
//! - Weather: the upstream current-conditions and forecast payloads

pub mod place;
pub mod weather;

// Re-export all public types for convenient access
pub use place::{PlaceCandidate, UserLocation};
pub use weather::{ForecastEntry, ForecastResponse, WeatherSnapshot};
