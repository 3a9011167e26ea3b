//! One-shot position acquisition with a timeout

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::config::GeolocationConfig;
use crate::location_cache::LocationCache;
use crate::models::UserLocation;
use crate::{Result, WeatherMoodError};

/// Platform capability answering "where is the user?"
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Resolve once, or fail with `GeolocationDenied`
    async fn current_position(&self) -> Result<UserLocation>;
}

/// Provider backed by a configured position; no position means denied
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<UserLocation>);

impl FixedPosition {
    #[must_use]
    pub fn from_config(config: &GeolocationConfig) -> Self {
        Self(config.fixed_position())
    }
}

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<UserLocation> {
        self.0.ok_or(WeatherMoodError::GeolocationDenied)
    }
}

/// Wraps a provider with a deadline and records successes in the cache
#[derive(Clone)]
pub struct Geolocator {
    provider: Arc<dyn PositionProvider>,
    cache: LocationCache,
    timeout: Duration,
}

impl Geolocator {
    pub fn new(provider: Arc<dyn PositionProvider>, cache: LocationCache, timeout: Duration) -> Self {
        Self {
            provider,
            cache,
            timeout,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &LocationCache {
        &self.cache
    }

    #[instrument(skip(self))]
    pub async fn locate(&self) -> Result<UserLocation> {
        let position = tokio::time::timeout(self.timeout, self.provider.current_position())
            .await
            .map_err(|_| {
                warn!("No position after {:?}", self.timeout);
                WeatherMoodError::GeolocationTimeout
            })??;

        info!("Located user at {}", position.format_coordinates());
        self.cache.set(position);
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverAnswers;

    #[async_trait]
    impl PositionProvider for NeverAnswers {
        async fn current_position(&self) -> Result<UserLocation> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(UserLocation::new(0.0, 0.0))
        }
    }

    fn geolocator(provider: impl PositionProvider + 'static) -> Geolocator {
        Geolocator::new(Arc::new(provider), LocationCache::new(), Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_success_updates_cache() {
        let here = UserLocation::new(48.2, 16.37);
        let geolocator = geolocator(FixedPosition(Some(here)));

        assert_eq!(geolocator.locate().await.unwrap(), here);
        assert_eq!(geolocator.cache().get(), Some(here));
    }

    #[tokio::test]
    async fn test_denied_leaves_cache_empty() {
        let geolocator = geolocator(FixedPosition(None));

        let err = geolocator.locate().await.unwrap_err();
        assert_eq!(err, WeatherMoodError::GeolocationDenied);
        assert!(!geolocator.cache().is_known());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let geolocator = geolocator(NeverAnswers);

        let err = geolocator.locate().await.unwrap_err();
        assert_eq!(err, WeatherMoodError::GeolocationTimeout);
        assert!(!geolocator.cache().is_known());
    }

    #[test]
    fn test_fixed_position_from_config() {
        let config = GeolocationConfig {
            latitude: Some(1.0),
            longitude: Some(2.0),
            ..GeolocationConfig::default()
        };
        assert_eq!(
            FixedPosition::from_config(&config).0,
            Some(UserLocation::new(1.0, 2.0))
        );
        assert!(FixedPosition::from_config(&GeolocationConfig::default()).0.is_none());
    }
}
