//! View-model rows for the suggestion dropdown

use serde::Serialize;

use super::ranking::ScoredCandidate;
use crate::models::PlaceCandidate;

/// One row shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRow {
    pub label: String,
    pub distance_badge: Option<String>,
}

/// `"<name>, <region>, <country>"`, skipping blank parts
#[must_use]
pub fn label_for(candidate: &PlaceCandidate) -> String {
    [
        Some(candidate.name.as_str()),
        candidate.region.as_deref(),
        Some(candidate.country.as_str()),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

#[must_use]
pub fn distance_badge(distance_km: f64) -> String {
    if distance_km < 1.0 {
        "<1 km".to_string()
    } else {
        format!("{:.0} km", distance_km.round())
    }
}

/// Map ranked candidates to rows, preserving order
#[must_use]
pub fn rows(ranked: &[ScoredCandidate]) -> Vec<SuggestionRow> {
    ranked
        .iter()
        .map(|scored| SuggestionRow {
            label: label_for(&scored.candidate),
            distance_badge: scored.distance_km.map(distance_badge),
        })
        .collect()
}
