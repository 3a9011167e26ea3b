//! Debounced scheduling of suggestion lookups.
//!
//! A [`Debouncer`] holds at most one pending timer. Every qualifying input
//! replaces it; input shorter than the minimum only cancels it. When a timer
//! elapses, the query and a freshly advanced [`QueryGeneration`] token are
//! handed to a detached task, so cancelling a later timer never aborts a
//! request that is already in flight. Stale results are filtered by token.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Monotonic counter identifying the latest issued request
#[derive(Debug, Clone, Default)]
pub struct QueryGeneration {
    latest: Arc<AtomicU64>,
}

impl QueryGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token; it becomes the latest
    pub fn advance(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_latest(&self, token: u64) -> bool {
        self.latest() == token
    }
}

pub struct Debouncer {
    window: Duration,
    min_chars: usize,
    generation: QueryGeneration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration, min_chars: usize) -> Self {
        Self::with_generation(window, min_chars, QueryGeneration::new())
    }

    /// Share an existing generation counter with the caller
    #[must_use]
    pub fn with_generation(window: Duration, min_chars: usize, generation: QueryGeneration) -> Self {
        Self {
            window,
            min_chars,
            generation,
            pending: None,
        }
    }

    #[must_use]
    pub fn generation(&self) -> &QueryGeneration {
        &self.generation
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Arm the timer for `input`.
    ///
    /// Returns `false` when the trimmed input is too short; any pending timer
    /// is cancelled either way. Must be called within a tokio runtime.
    pub fn schedule<F, Fut>(&mut self, input: &str, action: F) -> bool
    where
        F: FnOnce(String, u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let query = input.trim();
        if query.chars().count() < self.min_chars {
            debug!("Input '{}' below {} characters, nothing scheduled", query, self.min_chars);
            return false;
        }

        let query = query.to_string();
        let window = self.window;
        let generation = self.generation.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // No await between advancing and spawning, so an abort cannot split them
            let token = generation.advance();
            debug!("Debounce elapsed, dispatching '{}' as generation {}", query, token);
            tokio::spawn(action(query, token));
        }));

        true
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
