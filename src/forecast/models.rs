use serde::{Deserialize, Serialize};

use crate::conditions::Condition;

// ============================================================================
// Raw Open-Meteo Payload (Internal)
// The daily block is a struct-of-arrays keyed by index; individual slots can
// be null, so every array holds optional values.
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RawForecastPayload {
    #[serde(default)]
    pub daily: Option<RawDailySeries>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDailySeries {
    /// ISO dates, e.g. "2026-08-23"
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_max: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

// ============================================================================
// Canonical Model
// ============================================================================

/// One day of the normalized forecast, at most five per fetch, in ascending
/// date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    /// Epoch seconds at the start of the day (UTC)
    pub date: i64,
    /// Minimum temperature in degrees Celsius
    pub temperature_min: f64,
    /// Maximum temperature in degrees Celsius
    pub temperature_max: f64,
    /// Mean of min and max
    pub temperature_mean: f64,
    /// Mean of the apparent min and max
    pub feels_like_mean: f64,
    pub condition: Condition,
    pub description: String,
    /// Icon code with a fixed day suffix, e.g. "10d"
    pub icon: String,
    /// Relative humidity, 0-100; the provider has no daily humidity, so this
    /// carries a fixed default of 50
    pub humidity: u8,
    /// Maximum wind speed in m/s
    pub wind_speed_max: f64,
    /// 0.0-1.0; exactly 0.0 means "not shown"
    pub precipitation_probability: f64,
}
