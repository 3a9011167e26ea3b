//! View models for the current-conditions panel and the daily forecast strip

use chrono::DateTime;
use serde::Serialize;

use crate::config::ForecastConfig;
use crate::models::{ForecastEntry, WeatherSnapshot};
use crate::models::weather::Condition;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Current conditions ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    /// `"<name>, <country>"`
    pub title: String,
    /// Whole degrees with a degree sign, e.g. `"18°"`
    pub temperature: String,
    pub icon_url: Option<String>,
    /// Condition group, e.g. `"Rain"`; drives the mood
    pub condition: String,
    pub description: String,
}

/// One day of the forecast strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    /// Short weekday name, e.g. `"Mon"`
    pub day: String,
    pub icon_url: Option<String>,
    pub temperature: String,
}

/// Round half up to whole degrees, never printing `-0`
fn format_temperature(celsius: f64) -> String {
    let rounded = (celsius + 0.5).floor() + 0.0;
    format!("{rounded}°")
}

fn icon_url(condition: Option<&Condition>, suffix: &str) -> Option<String> {
    condition
        .map(|c| c.icon.trim())
        .filter(|icon| !icon.is_empty())
        .map(|icon| format!("{ICON_BASE_URL}/{icon}{suffix}.png"))
}

#[must_use]
pub fn current_view(snapshot: &WeatherSnapshot) -> CurrentView {
    let condition = snapshot.primary_condition();
    let title = if snapshot.sys.country.is_empty() {
        snapshot.name.clone()
    } else {
        format!("{}, {}", snapshot.name, snapshot.sys.country)
    };

    CurrentView {
        title,
        temperature: format_temperature(snapshot.main.temp),
        icon_url: icon_url(condition, "@4x"),
        condition: condition.map(|c| c.main.clone()).unwrap_or_default(),
        description: condition.map(|c| c.description.clone()).unwrap_or_default(),
    }
}

/// Pick one entry per day: those whose `dt_txt` contains `marker`, in
/// chronological order, at most `max_days` of them. No padding when fewer match.
#[must_use]
pub fn select_daily(mut entries: Vec<ForecastEntry>, marker: &str, max_days: usize) -> Vec<ForecastEntry> {
    entries.sort_by_key(|entry| entry.dt);
    entries
        .into_iter()
        .filter(|entry| entry.dt_txt.contains(marker))
        .take(max_days)
        .collect()
}

fn weekday(entry: &ForecastEntry) -> String {
    match DateTime::from_timestamp(entry.dt, 0) {
        Some(time) => time.format("%a").to_string(),
        None => entry.dt_txt.chars().take(10).collect(),
    }
}

#[must_use]
pub fn forecast_card(entry: &ForecastEntry) -> ForecastCard {
    ForecastCard {
        day: weekday(entry),
        icon_url: icon_url(entry.primary_condition(), ""),
        temperature: format_temperature(entry.main.temp),
    }
}

/// Daily cards for a raw forecast list, per the configured policy
#[must_use]
pub fn forecast_cards(entries: Vec<ForecastEntry>, config: &ForecastConfig) -> Vec<ForecastCard> {
    select_daily(entries, &config.noon_marker, config.max_days)
        .iter()
        .map(forecast_card)
        .collect()
}
