//! HTTP client for the weather proxy endpoint
//!
//! Every call is a single GET with no retries. The body is always read as raw
//! text first because proxy and hosting failures can answer with HTML; all
//! failure modes are folded into [`WeatherMoodError`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::ProxyConfig;
use crate::error::REQUEST_FAILED_FALLBACK;
use crate::models::{ForecastEntry, ForecastResponse, PlaceCandidate, WeatherSnapshot};
use crate::suggest::SuggestionSource;
use crate::weather::{WeatherSource, validate_city};
use crate::{Result, WeatherMoodError};

/// Client for the proxy's four query modes
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    /// Create a new proxy client
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| WeatherMoodError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('?').to_string(),
        })
    }

    /// Create a client for `base_url` with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let config = ProxyConfig {
            base_url: base_url.to_string(),
            ..ProxyConfig::default()
        };
        Self::new(&config)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn city_url(&self, city: &str) -> String {
        format!("{}?city={}", self.base_url, urlencoding::encode(city))
    }

    #[must_use]
    pub fn coords_url(&self, lat: f64, lon: f64) -> String {
        format!("{}?lat={}&lon={}", self.base_url, lat, lon)
    }

    #[must_use]
    pub fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!("{}?lat={}&lon={}&type=forecast", self.base_url, lat, lon)
    }

    #[must_use]
    pub fn suggestions_url(&self, query: &str) -> String {
        format!("{}?q={}", self.base_url, urlencoding::encode(query))
    }

    /// Perform one request and return the parsed JSON body
    ///
    /// - unreachable service or non-JSON body: `ServiceUnavailable`
    /// - JSON body with a failure status: `RequestFailed` carrying the body's
    ///   `message`, or a generic fallback
    #[instrument(skip(self))]
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Proxy request failed: {}", e);
            WeatherMoodError::ServiceUnavailable
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!("Failed to read proxy response body: {}", e);
            WeatherMoodError::ServiceUnavailable
        })?;

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            warn!(
                "Proxy answered {} with a non-JSON body ({} bytes): {}",
                status,
                text.len(),
                e
            );
            WeatherMoodError::ServiceUnavailable
        })?;

        if !status.is_success() {
            let message = upstream_message(&data).unwrap_or(REQUEST_FAILED_FALLBACK);
            info!("Proxy request failed with status {}: {}", status, message);
            return Err(WeatherMoodError::request_failed(message));
        }

        let elapsed = start_time.elapsed();
        debug!("Proxy answered {} in {:.3}s", status, elapsed.as_secs_f64());
        if elapsed > Duration::from_secs(5) {
            warn!("Slow proxy response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(data)
    }

    /// Decode a successful body into `T`.
    ///
    /// The proxy relays upstream errors such as `{"cod":"404","message":...}`
    /// with a 200 status; such a body yields `RequestFailed` with its message.
    async fn fetch_typed<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let data = self.fetch_json(url).await?;
        let relayed = upstream_message(&data).map(str::to_string);
        serde_json::from_value(data).map_err(|e| match relayed {
            Some(message) => {
                info!("Upstream reported an error for {}: {}", what, message);
                WeatherMoodError::request_failed(message)
            }
            None => {
                warn!("Failed to read {} payload: {}", what, e);
                WeatherMoodError::unexpected_payload(format!("{what}: {e}"))
            }
        })
    }
}

/// Non-empty string `message` field of a JSON object
fn upstream_message(data: &Value) -> Option<&str> {
    data.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
}

#[async_trait]
impl WeatherSource for ProxyClient {
    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot> {
        let city = validate_city(city)?;
        self.fetch_typed(&self.city_url(city), "current conditions")
            .await
    }

    async fn current_by_coords(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot> {
        self.fetch_typed(&self.coords_url(lat, lon), "current conditions")
            .await
    }

    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastEntry>> {
        let response: ForecastResponse = self
            .fetch_typed(&self.forecast_url(lat, lon), "forecast")
            .await?;
        Ok(response.list)
    }
}

#[async_trait]
impl SuggestionSource for ProxyClient {
    async fn suggest(&self, query: &str) -> Vec<PlaceCandidate> {
        match self
            .fetch_typed::<Vec<PlaceCandidate>>(&self.suggestions_url(query), "suggestions")
            .await
        {
            Ok(candidates) => {
                debug!("{} suggestions for '{}'", candidates.len(), query);
                candidates
            }
            Err(e) => {
                warn!("Suggestion lookup for '{}' failed, showing none: {}", query, e);
                Vec::new()
            }
        }
    }
}
