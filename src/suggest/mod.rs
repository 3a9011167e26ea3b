//! Place suggestions while the user types.
//!
//! Input events go through the [`Debouncer`]; once it fires, the
//! [`SuggestionSource`] is queried, results are ranked against the cached user
//! location and handed to the [`SuggestionPresenter`]. Results from a request
//! that is no longer the latest are dropped.

pub mod debounce;
pub mod ranking;
pub mod scoring;
pub mod view;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::WeatherMoodConfig;
use crate::location_cache::LocationCache;
use crate::models::PlaceCandidate;

pub use debounce::{Debouncer, QueryGeneration};
pub use ranking::{RankingWeights, ScoredCandidate, rank};
pub use scoring::{distance_km, name_score, proximity_score};
pub use view::{SuggestionRow, distance_badge, label_for};

/// Place lookup for a partial query
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Candidates for `query` in source order. Failures yield an empty list.
    async fn suggest(&self, query: &str) -> Vec<PlaceCandidate>;
}

/// Receives the rows to display, replacing whatever was shown before
pub trait SuggestionPresenter: Send + Sync {
    fn show_suggestions(&self, rows: Vec<SuggestionRow>);
}

struct EngineState {
    source: Arc<dyn SuggestionSource>,
    presenter: Arc<dyn SuggestionPresenter>,
    location: LocationCache,
    weights: RankingWeights,
    min_query_chars: usize,
    generation: QueryGeneration,
    // Guards check-and-apply of results as well as the shown list
    current: Mutex<Vec<ScoredCandidate>>,
}

impl EngineState {
    fn current(&self) -> MutexGuard<'_, Vec<ScoredCandidate>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn refresh(&self, query: String, token: u64) -> bool {
        let candidates = self.source.suggest(&query).await;

        let mut current = self.current();
        if !self.generation.is_latest(token) {
            debug!(
                "Discarding {} suggestions for '{}' (generation {} superseded by {})",
                candidates.len(),
                query,
                token,
                self.generation.latest()
            );
            return false;
        }

        // Location is read after the fetch so a fix that arrived meanwhile is used
        let ranked = rank(&query, candidates, self.location.get(), &self.weights);
        info!("Showing {} suggestions for '{}'", ranked.len(), query);
        self.presenter.show_suggestions(view::rows(&ranked));
        *current = ranked;
        true
    }

    fn clear(&self) {
        let mut current = self.current();
        if !current.is_empty() {
            current.clear();
            self.presenter.show_suggestions(Vec::new());
        }
    }
}

/// Debounced, ranked suggestion lookups bound to one presenter
pub struct SuggestionEngine {
    state: Arc<EngineState>,
    debouncer: Debouncer,
}

impl SuggestionEngine {
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        presenter: Arc<dyn SuggestionPresenter>,
        location: LocationCache,
        config: &WeatherMoodConfig,
    ) -> Self {
        let generation = QueryGeneration::new();
        let debouncer = Debouncer::with_generation(
            config.suggestions.debounce_window(),
            config.suggestions.min_query_chars,
            generation.clone(),
        );

        Self {
            state: Arc::new(EngineState {
                source,
                presenter,
                location,
                weights: config.ranking.weights(),
                min_query_chars: config.suggestions.min_query_chars,
                generation,
                current: Mutex::new(Vec::new()),
            }),
            debouncer,
        }
    }

    /// Feed the current text of the search field.
    ///
    /// Returns whether a lookup was scheduled. Text below the minimum length
    /// clears the shown list and invalidates requests already in flight.
    pub fn on_input(&mut self, input: &str) -> bool {
        let state = Arc::clone(&self.state);
        let scheduled = self
            .debouncer
            .schedule(input, move |query, token| async move {
                state.refresh(query, token).await;
            });

        if !scheduled {
            self.state.generation.advance();
            self.state.clear();
        }
        scheduled
    }

    /// Look up `query` right away, bypassing the debounce window.
    ///
    /// The minimum-length rule still applies: a shorter query clears the list
    /// without contacting the source.
    pub async fn lookup(&mut self, query: &str) -> Vec<ScoredCandidate> {
        self.debouncer.cancel();
        let token = self.state.generation.advance();

        let query = query.trim();
        if query.chars().count() < self.state.min_query_chars {
            debug!("Query '{}' below {} characters, not looked up", query, self.state.min_query_chars);
            self.state.clear();
            return Vec::new();
        }

        self.state.refresh(query.to_string(), token).await;
        self.current_candidates()
    }

    /// Resolve a shown row back to its candidate and close the list
    pub fn commit_selection(&mut self, label: &str) -> Option<PlaceCandidate> {
        let chosen = self
            .state
            .current()
            .iter()
            .find(|scored| label_for(&scored.candidate) == label)
            .map(|scored| scored.candidate.clone())?;

        debug!("Selected suggestion '{}'", label);
        self.debouncer.cancel();
        self.state.generation.advance();
        self.state.clear();
        Some(chosen)
    }

    /// Ranked candidates currently shown
    #[must_use]
    pub fn current_candidates(&self) -> Vec<ScoredCandidate> {
        self.state.current().clone()
    }

    #[must_use]
    pub fn generation(&self) -> &QueryGeneration {
        &self.state.generation
    }
}
