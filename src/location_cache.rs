//! Shared holder for the user's last known position.
//!
//! One writer path (a successful geolocation) and several readers (ranking,
//! weather controller). Writes are last-write-wins and the value is never
//! cleared once set. Readers must call [`LocationCache::get`] at the point of
//! use rather than holding on to an earlier copy.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::models::UserLocation;

/// Cloneable handle to the process-wide location cell
#[derive(Debug, Clone, Default)]
pub struct LocationCache {
    inner: Arc<RwLock<Option<UserLocation>>>,
}

impl LocationCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache seeded with a position
    #[must_use]
    pub fn with_location(location: UserLocation) -> Self {
        let cache = Self::new();
        cache.set(location);
        cache
    }

    /// Current position, if any geolocation has succeeded
    #[must_use]
    pub fn get(&self) -> Option<UserLocation> {
        // A poisoned lock still holds a valid Copy value
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a new position
    pub fn set(&self, location: UserLocation) {
        debug!("User location set to {}", location.format_coordinates());
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(location);
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let cache = LocationCache::new();
        assert!(cache.get().is_none());
        assert!(!cache.is_known());
    }

    #[test]
    fn test_last_write_wins() {
        let cache = LocationCache::new();
        cache.set(UserLocation::new(51.5, -0.1));
        cache.set(UserLocation::new(48.85, 2.35));
        assert_eq!(cache.get(), Some(UserLocation::new(48.85, 2.35)));
    }

    #[test]
    fn test_clones_share_state() {
        let cache = LocationCache::new();
        let reader = cache.clone();
        cache.set(UserLocation::new(40.71, -74.0));
        assert_eq!(reader.get(), Some(UserLocation::new(40.71, -74.0)));
    }
}
