//! Name relevance and proximity scoring for place candidates.

use haversine::{Location as HaversineLocation, Units, distance};

use crate::models::UserLocation;

pub const EXACT_MATCH: f64 = 1.0;
pub const PREFIX_MATCH: f64 = 0.8;
pub const WORD_PREFIX_MATCH: f64 = 0.5;
pub const SUBSTRING_MATCH: f64 = 0.2;
pub const NO_MATCH: f64 = 0.0;

/// Score how well `name` matches the typed `query`.
///
/// Case-insensitive and whitespace-trimmed; the first rule that applies wins:
/// exact (1.0), prefix (0.8), prefix of a word token split on whitespace,
/// commas or hyphens (0.5), substring (0.2), otherwise 0.0.
#[must_use]
pub fn name_score(query: &str, name: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let name = name.trim().to_lowercase();

    if name == query {
        return EXACT_MATCH;
    }
    if query.is_empty() {
        return NO_MATCH;
    }
    if name.starts_with(&query) {
        return PREFIX_MATCH;
    }
    if name
        .split(|c: char| c.is_whitespace() || c == ',' || c == '-')
        .any(|token| !token.is_empty() && token.starts_with(&query))
    {
        return WORD_PREFIX_MATCH;
    }
    if name.contains(&query) {
        return SUBSTRING_MATCH;
    }
    NO_MATCH
}

/// Great-circle distance in kilometres (haversine, mean radius 6371 km)
#[must_use]
pub fn distance_km(from: UserLocation, to: UserLocation) -> f64 {
    distance(
        HaversineLocation {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        HaversineLocation {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        Units::Kilometers,
    )
}

/// Map a distance to `(0, 1]`: `1 / (1 + d / scale)`.
///
/// 1.0 at zero distance, 0.5 at `scale_km`, never zero.
#[must_use]
pub fn proximity_score(distance_km: f64, scale_km: f64) -> f64 {
    1.0 / (1.0 + distance_km.max(0.0) / scale_km)
}
