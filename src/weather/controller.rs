//! Weather fetch cycle: current conditions first, forecast best-effort.
//!
//! Every trigger walks `Idle -> Loading -> Success | Failed -> Idle`. The busy
//! indicator is switched off on every path. A failed primary fetch surfaces its
//! message and leaves the previous render alone; a failed forecast is logged
//! and shown as an empty strip.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::forecast::{CurrentView, ForecastCard, current_view, forecast_cards};
use super::{WeatherSource, validate_city};
use crate::config::ForecastConfig;
use crate::geolocation::Geolocator;
use crate::models::{PlaceCandidate, WeatherSnapshot};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Who asked for the user's position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateMode {
    /// Automatic attempt at startup; failures stay quiet
    Silent,
    /// Explicit request; failures are reported
    UserInitiated,
}

/// Display side of the weather panel
pub trait WeatherPresenter: Send + Sync {
    fn set_busy(&self, busy: bool);
    fn render_current(&self, view: &CurrentView);
    fn render_forecast(&self, cards: &[ForecastCard]);
    fn notify_error(&self, message: &str);
}

pub struct WeatherController {
    source: Arc<dyn WeatherSource>,
    presenter: Arc<dyn WeatherPresenter>,
    geolocator: Geolocator,
    forecast: ForecastConfig,
    state: Mutex<ControllerState>,
}

impl WeatherController {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        presenter: Arc<dyn WeatherPresenter>,
        geolocator: Geolocator,
        forecast: ForecastConfig,
    ) -> Self {
        Self {
            source,
            presenter,
            geolocator,
            forecast,
            state: Mutex::new(ControllerState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: ControllerState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("Weather controller {:?} -> {:?}", *state, next);
        *state = next;
    }

    /// Submit a city search. Blank input is rejected before any request.
    pub async fn search_city(&self, city: &str) -> Result<CurrentView> {
        let city = match validate_city(city) {
            Ok(city) => city,
            Err(e) => {
                self.presenter.notify_error(&e.user_message());
                return Err(e);
            }
        };
        info!("Searching weather for '{}'", city);
        self.run(self.source.current_by_city(city)).await
    }

    /// Load weather for a chosen suggestion
    pub async fn select_place(&self, place: &PlaceCandidate) -> Result<CurrentView> {
        info!("Loading weather for selected place '{}'", place.name);
        self.load_coordinates(place.latitude, place.longitude).await
    }

    pub async fn load_coordinates(&self, lat: f64, lon: f64) -> Result<CurrentView> {
        self.run(self.source.current_by_coords(lat, lon)).await
    }

    /// Acquire the user's position and load weather for it.
    ///
    /// Geolocation failures reach the presenter only for `UserInitiated`.
    pub async fn locate(&self, mode: LocateMode) -> Result<CurrentView> {
        let position = match self.geolocator.locate().await {
            Ok(position) => position,
            Err(e) => {
                match mode {
                    LocateMode::UserInitiated => self.presenter.notify_error(&e.user_message()),
                    LocateMode::Silent => debug!("Silent geolocation failed: {}", e),
                }
                return Err(e);
            }
        };
        self.load_coordinates(position.latitude, position.longitude)
            .await
    }

    async fn run<F>(&self, fetch: F) -> Result<CurrentView>
    where
        F: Future<Output = Result<WeatherSnapshot>>,
    {
        self.transition(ControllerState::Loading);
        self.presenter.set_busy(true);

        let outcome = match fetch.await {
            Ok(snapshot) => {
                let view = current_view(&snapshot);
                self.presenter.render_current(&view);
                self.transition(ControllerState::Success);
                self.load_forecast(&snapshot).await;
                Ok(view)
            }
            Err(e) => {
                warn!("Weather lookup failed: {}", e);
                self.transition(ControllerState::Failed);
                self.presenter.notify_error(&e.user_message());
                Err(e)
            }
        };

        self.presenter.set_busy(false);
        self.transition(ControllerState::Idle);
        outcome
    }

    async fn load_forecast(&self, snapshot: &WeatherSnapshot) {
        let Some(coord) = snapshot.coord else {
            debug!("No coordinates for '{}', skipping forecast", snapshot.name);
            self.presenter.render_forecast(&[]);
            return;
        };

        let cards = match self.source.forecast(coord.lat, coord.lon).await {
            Ok(entries) => forecast_cards(entries, &self.forecast),
            Err(e) => {
                warn!("Forecast unavailable for '{}': {}", snapshot.name, e);
                Vec::new()
            }
        };
        self.presenter.render_forecast(&cards);
    }
}

impl std::fmt::Debug for WeatherController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherController")
            .field("state", &self.state())
            .field("forecast", &self.forecast)
            .finish_non_exhaustive()
    }
}
