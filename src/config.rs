use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::store::{Theme, UnitSystem};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the Open-Meteo weather/forecast API
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// Base URL of the Open-Meteo geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Latitude substituted once when device geolocation fails at startup
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    /// Longitude substituted once when device geolocation fails at startup
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,

    /// Quiet window for search debouncing, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Unit system: metric or imperial
    #[serde(default)]
    pub units: UnitSystem,

    /// Theme: light or dark
    #[serde(default)]
    pub theme: Theme,
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

// London
fn default_fallback_latitude() -> f64 {
    51.5074
}

fn default_fallback_longitude() -> f64 {
    -0.1278
}

fn default_search_debounce_ms() -> u64 {
    300
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Start with default values
            .set_default("weather_base_url", default_weather_base_url())?
            .set_default("geocoding_base_url", default_geocoding_base_url())?
            .set_default("request_timeout_secs", default_request_timeout_secs())?
            .set_default("fallback_latitude", default_fallback_latitude())?
            .set_default("fallback_longitude", default_fallback_longitude())?
            .set_default("search_debounce_ms", default_search_debounce_ms())?
            .set_default("units", "metric")?
            .set_default("theme", "light")?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with SKYCAST_)
            // Convert SCREAMING_SNAKE_CASE env vars to snake_case config keys
            .add_source(
                Environment::with_prefix("SKYCAST")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
