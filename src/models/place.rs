//! Place models for suggestion candidates and user coordinates

use serde::{Deserialize, Serialize};

/// A candidate place returned by the suggestion endpoint
///
/// The upstream shape is `{name, state?, country, lat, lon}`; coordinates are
/// trusted to be in range.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceCandidate {
    /// Place name as reported upstream
    pub name: String,
    /// State or region, when the upstream knows one
    #[serde(rename = "state", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Country code (ISO 3166-1 alpha-2)
    #[serde(default)]
    pub country: String,
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl PlaceCandidate {
    /// Create a new candidate without a region
    #[must_use]
    pub fn new(name: &str, country: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            region: None,
            country: country.to_string(),
            latitude,
            longitude,
        }
    }

    /// Attach a region
    #[must_use]
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    #[must_use]
    pub fn coordinates(&self) -> UserLocation {
        UserLocation::new(self.latitude, self.longitude)
    }
}

/// The user's last known position
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct UserLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl UserLocation {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Parse `"lat,lon"` or `"lat lon"`
    pub fn parse(input: &str) -> Option<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let [lat, lon] = parts.as_slice() else {
            return None;
        };

        let lat = lat.parse::<f64>().ok()?;
        let lon = lon.parse::<f64>().ok()?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }

        Some(Self::new(lat, lon))
    }
}
