use reqwest::Client;

use super::models::{CurrentWeather, RawCurrentPayload};
use crate::conditions;
use crate::error::{ensure_success, AppError};

/// Instantaneous variables requested from the provider.
const CURRENT_VARIABLES: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
is_day,precipitation,weather_code,cloud_cover,pressure_msl,wind_speed_10m,wind_direction_10m";

pub struct WeatherService {
    client: Client,
    base_url: String,
}

impl WeatherService {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and normalize current conditions for a coordinate pair.
    pub async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, AppError> {
        tracing::debug!(latitude, longitude, "Fetching current conditions");

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_VARIABLES.to_string()),
                ("timezone", "auto".to_string()),
                ("wind_speed_unit", "ms".to_string()),
            ])
            .send()
            .await
            .map_err(AppError::from_transport)?;

        let response = ensure_success(response).await?;

        let payload: RawCurrentPayload =
            response.json().await.map_err(AppError::from_transport)?;

        let weather = normalize_current(payload, chrono::Utc::now().timestamp());
        tracing::info!(
            temperature = weather.temperature,
            condition = %weather.condition,
            "Current conditions fetched"
        );

        Ok(weather)
    }
}

/// Normalize a raw provider payload into the canonical model.
///
/// Total: a structurally malformed payload degrades field-by-field to zero /
/// empty-string defaults rather than failing. The day/night icon suffix comes
/// from the payload's own `is_day` flag, never recomputed locally.
pub fn normalize_current(payload: RawCurrentPayload, now: i64) -> CurrentWeather {
    let current = payload.current.unwrap_or_default();

    let row = current
        .weather_code
        .map_or_else(conditions::unknown, conditions::lookup);
    let suffix = if current.is_day.unwrap_or(0) == 1 {
        "d"
    } else {
        "n"
    };

    CurrentWeather {
        temperature: current.temperature_2m.unwrap_or(0.0),
        feels_like: current.apparent_temperature.unwrap_or(0.0),
        humidity: current.relative_humidity_2m.unwrap_or(0.0).clamp(0.0, 100.0).round() as u8,
        pressure: current.pressure_msl.unwrap_or(0.0).max(0.0).round() as u32,
        wind_speed: current.wind_speed_10m.unwrap_or(0.0),
        wind_direction: (current.wind_direction_10m.unwrap_or(0).rem_euclid(360)) as u16,
        visibility: current.visibility.unwrap_or(0.0).max(0.0).round() as u32,
        cloud_cover: current.cloud_cover.unwrap_or(0.0).clamp(0.0, 100.0).round() as u8,
        condition: row.condition,
        description: row.description.to_string(),
        icon: format!("{}{}", row.icon, suffix),
        // The current-conditions query does not carry sun times
        sunrise: 0,
        sunset: 0,
        fetched_at: now,
        location_name: "Location".to_string(),
        country_code: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Condition;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn full_payload() -> RawCurrentPayload {
        serde_json::from_value(serde_json::json!({
            "latitude": 51.5,
            "longitude": -0.12,
            "current": {
                "temperature_2m": 17.3,
                "relative_humidity_2m": 68,
                "apparent_temperature": 16.1,
                "is_day": 1,
                "precipitation": 0.0,
                "weather_code": 61,
                "cloud_cover": 85,
                "pressure_msl": 1009.4,
                "wind_speed_10m": 4.6,
                "wind_direction_10m": 230
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_current_full_payload() {
        let weather = normalize_current(full_payload(), 1_700_000_000);

        assert_eq!(weather.temperature, 17.3);
        assert_eq!(weather.feels_like, 16.1);
        assert_eq!(weather.humidity, 68);
        assert_eq!(weather.pressure, 1009);
        assert_eq!(weather.wind_speed, 4.6);
        assert_eq!(weather.wind_direction, 230);
        assert_eq!(weather.cloud_cover, 85);
        assert_eq!(weather.condition, Condition::Rain);
        assert_eq!(weather.description, "Slight rain");
        assert_eq!(weather.icon, "10d");
        assert_eq!(weather.fetched_at, 1_700_000_000);
        assert_eq!(weather.location_name, "Location");
    }

    #[test]
    fn test_normalize_current_empty_payload_defaults_to_zero() {
        let payload: RawCurrentPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        let weather = normalize_current(payload, 0);

        assert_eq!(weather.temperature, 0.0);
        assert_eq!(weather.feels_like, 0.0);
        assert_eq!(weather.humidity, 0);
        assert_eq!(weather.pressure, 0);
        assert_eq!(weather.wind_speed, 0.0);
        assert_eq!(weather.visibility, 0);
        assert_eq!(weather.sunrise, 0);
        assert_eq!(weather.sunset, 0);
        // Absent weather code is not a known code, so it degrades to Unknown
        assert_eq!(weather.condition, Condition::Unknown);
        assert_eq!(weather.description, "Unknown weather");
    }

    #[test]
    fn test_normalize_current_night_suffix() {
        let payload: RawCurrentPayload = serde_json::from_value(serde_json::json!({
            "current": { "weather_code": 0, "is_day": 0 }
        }))
        .unwrap();
        assert_eq!(normalize_current(payload, 0).icon, "01n");

        // Absent is_day counts as night, matching the provider contract that
        // the flag is only trusted when present
        let payload: RawCurrentPayload = serde_json::from_value(serde_json::json!({
            "current": { "weather_code": 0 }
        }))
        .unwrap();
        assert_eq!(normalize_current(payload, 0).icon, "01n");
    }

    #[test]
    fn test_normalize_current_wraps_wind_direction() {
        let payload: RawCurrentPayload = serde_json::from_value(serde_json::json!({
            "current": { "wind_direction_10m": 360 }
        }))
        .unwrap();
        assert_eq!(normalize_current(payload, 0).wind_direction, 0);
    }

    #[tokio::test]
    async fn test_get_current_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("timezone", "auto"))
            .and(query_param("wind_speed_unit", "ms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": { "temperature_2m": 21.0, "weather_code": 2, "is_day": 1 }
            })))
            .mount(&server)
            .await;

        let service = WeatherService::new(Client::new(), &server.uri());
        let weather = service.get_current(51.5074, -0.1278).await.unwrap();

        assert_eq!(weather.temperature, 21.0);
        assert_eq!(weather.condition, Condition::Clouds);
        assert_eq!(weather.icon, "02d");
    }

    #[tokio::test]
    async fn test_get_current_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let service = WeatherService::new(Client::new(), &server.uri());
        let err = service.get_current(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, AppError::RateLimited));
    }

    #[tokio::test]
    async fn test_get_current_provider_reason_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": true,
                "reason": "temporarily unavailable"
            })))
            .mount(&server)
            .await;

        let service = WeatherService::new(Client::new(), &server.uri());
        let err = service.get_current(0.0, 0.0).await.unwrap_err();
        match err {
            AppError::Provider(reason) => assert_eq!(reason, "temporarily unavailable"),
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
