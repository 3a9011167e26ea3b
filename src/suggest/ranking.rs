//! Hybrid ranking of suggestion candidates.
//!
//! With a known user location every candidate gets
//! `name_weight * name + proximity_weight * proximity` and the list is sorted
//! by that score, descending and stable on ties. Without a location the
//! source order is returned untouched and no scoring pass runs.

use serde::Serialize;

use super::scoring::{distance_km, name_score, proximity_score};
use crate::models::{PlaceCandidate, UserLocation};

pub const DEFAULT_NAME_WEIGHT: f64 = 0.6;
pub const DEFAULT_PROXIMITY_WEIGHT: f64 = 0.4;
pub const DEFAULT_PROXIMITY_SCALE_KM: f64 = 500.0;

/// Blend constants for the combined score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankingWeights {
    pub name_weight: f64,
    pub proximity_weight: f64,
    pub proximity_scale_km: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            name_weight: DEFAULT_NAME_WEIGHT,
            proximity_weight: DEFAULT_PROXIMITY_WEIGHT,
            proximity_scale_km: DEFAULT_PROXIMITY_SCALE_KM,
        }
    }
}

impl RankingWeights {
    #[must_use]
    pub fn combine(&self, name_score: f64, proximity_score: f64) -> f64 {
        self.name_weight * name_score + self.proximity_weight * proximity_score
    }
}

/// A candidate with the scores computed for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: PlaceCandidate,
    /// `None` when no location was known and no scoring pass ran
    pub name_score: Option<f64>,
    pub proximity_score: Option<f64>,
    pub combined_score: Option<f64>,
    pub distance_km: Option<f64>,
}

impl ScoredCandidate {
    fn unscored(candidate: PlaceCandidate) -> Self {
        Self {
            candidate,
            name_score: None,
            proximity_score: None,
            combined_score: None,
            distance_km: None,
        }
    }
}

/// Rank `candidates` for `query`
#[must_use]
pub fn rank(
    query: &str,
    candidates: Vec<PlaceCandidate>,
    location: Option<UserLocation>,
    weights: &RankingWeights,
) -> Vec<ScoredCandidate> {
    let Some(here) = location else {
        return candidates
            .into_iter()
            .map(ScoredCandidate::unscored)
            .collect();
    };

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let name = name_score(query, &candidate.name);
            let distance = distance_km(here, candidate.coordinates());
            let proximity = proximity_score(distance, weights.proximity_scale_km);
            ScoredCandidate {
                candidate,
                name_score: Some(name),
                proximity_score: Some(proximity),
                combined_score: Some(weights.combine(name, proximity)),
                distance_km: Some(distance),
            }
        })
        .collect();

    // sort_by is stable: equal scores keep source order
    scored.sort_by(|a, b| {
        let a = a.combined_score.unwrap_or_default();
        let b = b.combined_score.unwrap_or_default();
        b.total_cmp(&a)
    });

    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> PlaceCandidate {
        PlaceCandidate::new("London", "GB", 51.50, -0.12)
    }

    fn long_beach() -> PlaceCandidate {
        PlaceCandidate::new("Long Beach", "US", 33.77, -118.19)
    }

    #[test]
    fn test_london_beats_long_beach_near_london() {
        let here = UserLocation::new(51.50, -0.10);
        let ranked = rank(
            "Lon",
            vec![long_beach(), london()],
            Some(here),
            &RankingWeights::default(),
        );

        assert_eq!(ranked[0].candidate.name, "London");
        assert_eq!(ranked[1].candidate.name, "Long Beach");

        assert_eq!(ranked[0].name_score, Some(0.8));
        assert_eq!(ranked[1].name_score, Some(0.8));

        let london_prox = ranked[0].proximity_score.unwrap();
        let beach_prox = ranked[1].proximity_score.unwrap();
        assert!(london_prox > 0.99);
        assert!((beach_prox - 0.055).abs() < 0.005, "got {beach_prox}");

        let london_combined = ranked[0].combined_score.unwrap();
        let beach_combined = ranked[1].combined_score.unwrap();
        assert!((london_combined - 0.88).abs() < 0.005);
        assert!((beach_combined - 0.502).abs() < 0.005);
    }

    #[test]
    fn test_without_location_source_order_is_kept() {
        let candidates = vec![
            PlaceCandidate::new("Springfield", "US", 39.8, -89.6),
            PlaceCandidate::new("Spring", "US", 30.1, -95.4),
            PlaceCandidate::new("Springs", "ZA", -26.2, 28.4),
        ];
        let ranked = rank("Spring", candidates.clone(), None, &RankingWeights::default());

        let names: Vec<_> = ranked.iter().map(|s| s.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["Springfield", "Spring", "Springs"]);
        assert!(ranked.iter().all(|s| s.name_score.is_none()));
        assert!(ranked.iter().all(|s| s.proximity_score.is_none()));
        assert!(ranked.iter().all(|s| s.combined_score.is_none()));
    }

    #[test]
    fn test_combined_scores_non_increasing() {
        let here = UserLocation::new(40.71, -74.0);
        let candidates = vec![
            PlaceCandidate::new("Newark", "US", 40.73, -74.17),
            PlaceCandidate::new("New York", "US", 40.71, -74.0),
            PlaceCandidate::new("Newcastle", "GB", 54.97, -1.61),
            PlaceCandidate::new("York", "GB", 53.96, -1.08),
            PlaceCandidate::new("New Delhi", "IN", 28.61, 77.21),
        ];
        let ranked = rank("new", candidates, Some(here), &RankingWeights::default());

        for pair in ranked.windows(2) {
            assert!(pair[0].combined_score.unwrap() >= pair[1].combined_score.unwrap());
        }
    }

    #[test]
    fn test_ties_are_stable() {
        let here = UserLocation::new(0.0, 0.0);
        let candidates = vec![
            PlaceCandidate::new("Alpha", "AA", 10.0, 10.0),
            PlaceCandidate::new("Alpha", "BB", 10.0, 10.0),
            PlaceCandidate::new("Alpha", "CC", 10.0, 10.0),
        ];
        let ranked = rank("alp", candidates, Some(here), &RankingWeights::default());
        let countries: Vec<_> = ranked.iter().map(|s| s.candidate.country.as_str()).collect();
        assert_eq!(countries, vec!["AA", "BB", "CC"]);
    }

    #[test]
    fn test_custom_weights_can_favour_proximity() {
        let here = UserLocation::new(33.77, -118.19);
        let weights = RankingWeights {
            name_weight: 0.1,
            proximity_weight: 0.9,
            proximity_scale_km: 500.0,
        };
        let candidates = vec![
            PlaceCandidate::new("Lon", "XX", 51.5, -0.12),
            long_beach(),
        ];
        let ranked = rank("Lon", candidates, Some(here), &weights);
        assert_eq!(ranked[0].candidate.name, "Long Beach");
    }
}
