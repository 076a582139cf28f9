use serde::{Deserialize, Serialize};

use crate::conditions::Condition;

// ============================================================================
// Raw Open-Meteo Payload (Internal)
// Every field is optional: the provider's schema varies by query type, so the
// parse step applies defaults field-by-field instead of failing.
// ============================================================================

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
pub struct RawCurrentPayload {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub current: Option<RawCurrentBlock>,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
pub struct RawCurrentBlock {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(default)]
    pub is_day: Option<i64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<i64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    #[serde(default)]
    pub pressure_msl: Option<f64>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default)]
    pub wind_direction_10m: Option<i64>,
    #[serde(default)]
    pub visibility: Option<f64>,
}

// ============================================================================
// Canonical Model (what the rest of the app consumes)
// ============================================================================

/// Current conditions at a resolved location.
///
/// Constructed fresh on every successful fetch and never mutated afterwards;
/// the next fetch supersedes it. All values are unit-agnostic internally
/// (Celsius, m/s, hPa, meters) and converted only at display time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Apparent temperature in degrees Celsius
    pub feels_like: f64,
    /// Relative humidity, 0-100
    pub humidity: u8,
    /// Mean sea-level pressure in hPa
    pub pressure: u32,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees, 0-359
    pub wind_direction: u16,
    /// Visibility in meters
    pub visibility: u32,
    /// Cloud cover, 0-100
    pub cloud_cover: u8,
    pub condition: Condition,
    pub description: String,
    /// Icon code plus day/night suffix, e.g. "01d"
    pub icon: String,
    /// Epoch seconds; zero when the provider omits it
    pub sunrise: i64,
    /// Epoch seconds; zero when the provider omits it
    pub sunset: i64,
    /// Epoch seconds at which this model was constructed
    pub fetched_at: i64,
    pub location_name: String,
    pub country_code: String,
}

impl CurrentWeather {
    /// A copy of this model carrying a resolved place label. Models are
    /// immutable once published, so labeling constructs a successor value.
    pub fn labeled(self, name: &str, country_code: &str) -> Self {
        Self {
            location_name: name.to_string(),
            country_code: country_code.to_string(),
            ..self
        }
    }
}
