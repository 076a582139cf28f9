//! Owned view-state container for the dashboard.
//!
//! One instance is constructed at startup and handed by reference to
//! whichever layer needs it; every mutation goes through the action methods
//! below, never through ambient globals. Stored values stay unit-agnostic
//! (Celsius, m/s); the derived functions convert at read time only, so a
//! conversion is never applied to already-converted data.

use serde::{Deserialize, Serialize};

use crate::forecast::ForecastDay;
use crate::geocoding::SearchResult;
use crate::weather::CurrentWeather;

/// Meters-per-second to miles-per-hour.
const MPS_TO_MPH: f64 = 2.237;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug)]
pub struct WeatherStore {
    unit: UnitSystem,
    theme: Theme,
    current_weather: Option<CurrentWeather>,
    forecast: Vec<ForecastDay>,
    loading: bool,
    last_error: Option<String>,
    search_query: String,
    search_results: Vec<SearchResult>,
}

impl WeatherStore {
    pub fn new(unit: UnitSystem, theme: Theme) -> Self {
        Self {
            unit,
            theme,
            current_weather: None,
            forecast: Vec::new(),
            loading: false,
            last_error: None,
            search_query: String::new(),
            search_results: Vec::new(),
        }
    }

    // ===== Reads =====

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn current_weather(&self) -> Option<&CurrentWeather> {
        self.current_weather.as_ref()
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    // ===== Actions =====

    /// Replace the current weather in full; no merging with the old model.
    pub fn set_current_weather(&mut self, weather: CurrentWeather) {
        self.current_weather = Some(weather);
    }

    /// Replace the forecast in full.
    pub fn set_forecast(&mut self, forecast: Vec<ForecastDay>) {
        self.forecast = forecast;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Record a failure message. The last-known weather model is left
    /// untouched so a failed refresh does not blank the display.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn toggle_unit(&mut self) {
        self.unit = match self.unit {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        };
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_search_results(&mut self, results: Vec<SearchResult>) {
        self.search_results = results;
    }

    pub fn clear_search_results(&mut self) {
        self.search_results.clear();
    }

    /// Clear all fetched and search state. Unit and theme preferences
    /// survive a reset.
    pub fn reset(&mut self) {
        self.current_weather = None;
        self.forecast.clear();
        self.loading = false;
        self.last_error = None;
        self.search_query.clear();
        self.search_results.clear();
    }

    // ===== Derived values =====

    /// A stored Celsius value converted for display under the current unit
    /// system, rounded to a whole degree.
    pub fn display_temperature(&self, celsius: f64) -> i32 {
        match self.unit {
            UnitSystem::Metric => celsius.round() as i32,
            UnitSystem::Imperial => (celsius * 9.0 / 5.0 + 32.0).round() as i32,
        }
    }

    /// A stored m/s value converted for display: one decimal in metric,
    /// whole mph in imperial.
    pub fn display_wind_speed(&self, meters_per_second: f64) -> f64 {
        match self.unit {
            UnitSystem::Metric => (meters_per_second * 10.0).round() / 10.0,
            UnitSystem::Imperial => (meters_per_second * MPS_TO_MPH).round(),
        }
    }

    pub fn temperature_unit_label(&self) -> &'static str {
        match self.unit {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_speed_unit_label(&self) -> &'static str {
        match self.unit {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl Default for WeatherStore {
    fn default() -> Self {
        Self::new(UnitSystem::default(), Theme::default())
    }
}
