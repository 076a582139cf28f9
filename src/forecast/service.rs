use chrono::NaiveDate;
use reqwest::Client;

use super::models::{ForecastDay, RawDailySeries, RawForecastPayload};
use crate::conditions;
use crate::error::{ensure_success, AppError};

/// Daily aggregate variables requested from the provider.
const DAILY_VARIABLES: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
apparent_temperature_max,apparent_temperature_min,precipitation_sum,wind_speed_10m_max";

/// The dashboard shows at most this many days.
pub const FORECAST_DAYS: usize = 5;

/// The provider has no daily humidity variable; this stands in for it.
const DEFAULT_DAILY_HUMIDITY: u8 = 50;

pub struct ForecastService {
    client: Client,
    base_url: String,
}

impl ForecastService {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and normalize the multi-day forecast for a coordinate pair.
    pub async fn get_daily(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastDay>, AppError> {
        tracing::debug!(latitude, longitude, "Fetching daily forecast");

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
                ("timezone", "auto".to_string()),
                ("wind_speed_unit", "ms".to_string()),
            ])
            .send()
            .await
            .map_err(AppError::from_transport)?;

        let response = ensure_success(response).await?;

        let payload: RawForecastPayload =
            response.json().await.map_err(AppError::from_transport)?;

        let days = normalize_forecast(payload)?;
        tracing::info!(days = days.len(), "Daily forecast fetched");

        Ok(days)
    }
}

/// Normalize the raw daily series into at most [`FORECAST_DAYS`] entries.
///
/// Fails only when the series is wholly absent or empty; a short series and
/// missing per-day slots degrade to defaults instead.
pub fn normalize_forecast(payload: RawForecastPayload) -> Result<Vec<ForecastDay>, AppError> {
    let daily = payload
        .daily
        .ok_or_else(|| AppError::MalformedResponse("daily series missing".to_string()))?;

    if daily.time.is_empty() {
        return Err(AppError::MalformedResponse(
            "daily series is empty".to_string(),
        ));
    }

    let days = daily
        .time
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(i, date)| normalize_day(&daily, i, date))
        .collect();

    Ok(days)
}

fn normalize_day(daily: &RawDailySeries, index: usize, date: &str) -> ForecastDay {
    let row = slot(&daily.weather_code, index)
        .map_or_else(conditions::unknown, conditions::lookup);

    let temp_min = slot(&daily.temperature_2m_min, index).unwrap_or(0.0);
    let temp_max = slot(&daily.temperature_2m_max, index).unwrap_or(0.0);
    let feels_min = slot(&daily.apparent_temperature_min, index).unwrap_or(0.0);
    let feels_max = slot(&daily.apparent_temperature_max, index).unwrap_or(0.0);

    ForecastDay {
        date: day_start_epoch(date),
        temperature_min: temp_min,
        temperature_max: temp_max,
        temperature_mean: (temp_max + temp_min) / 2.0,
        feels_like_mean: (feels_max + feels_min) / 2.0,
        condition: row.condition,
        description: row.description.to_string(),
        icon: format!("{}d", row.icon),
        humidity: DEFAULT_DAILY_HUMIDITY,
        wind_speed_max: slot(&daily.wind_speed_10m_max, index).unwrap_or(0.0),
        precipitation_probability: slot(&daily.precipitation_sum, index)
            .map_or(0.0, |sum| sum.clamp(0.0, 1.0)),
    }
}

/// Fetch one slot of a struct-of-arrays column; short or null-holed columns
/// read as absent.
fn slot<T: Copy>(column: &[Option<T>], index: usize) -> Option<T> {
    column.get(index).copied().flatten()
}

/// Midnight UTC of an ISO date as epoch seconds; unparseable dates degrade
/// to zero.
fn day_start_epoch(date: &str) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Condition;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn series_of(len: usize) -> RawForecastPayload {
        let time: Vec<String> = (0..len).map(|i| format!("2026-08-{:02}", 10 + i)).collect();
        let codes: Vec<Option<i64>> = (0..len).map(|_| Some(61)).collect();
        let maxes: Vec<Option<f64>> = (0..len).map(|i| Some(20.0 + i as f64)).collect();
        let mins: Vec<Option<f64>> = (0..len).map(|i| Some(10.0 + i as f64)).collect();
        serde_json::from_value(serde_json::json!({
            "daily": {
                "time": time,
                "weather_code": codes,
                "temperature_2m_max": maxes,
                "temperature_2m_min": mins,
                "apparent_temperature_max": maxes,
                "apparent_temperature_min": mins,
                "precipitation_sum": (0..len).map(|_| Some(0.4)).collect::<Vec<_>>(),
                "wind_speed_10m_max": (0..len).map(|_| Some(7.2)).collect::<Vec<_>>()
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_forecast_caps_at_five_days_ascending() {
        let days = normalize_forecast(series_of(7)).unwrap();
        assert_eq!(days.len(), FORECAST_DAYS);
        for pair in days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_normalize_forecast_short_series_kept_as_is() {
        let days = normalize_forecast(series_of(3)).unwrap();
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn test_normalize_forecast_absent_series_fails() {
        let payload: RawForecastPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(
            normalize_forecast(payload),
            Err(AppError::MalformedResponse(_))
        ));

        let payload: RawForecastPayload =
            serde_json::from_value(serde_json::json!({ "daily": { "time": [] } })).unwrap();
        assert!(matches!(
            normalize_forecast(payload),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_normalize_forecast_means_and_defaults() {
        let days = normalize_forecast(series_of(1)).unwrap();
        let day = &days[0];
        assert_eq!(day.temperature_mean, 15.0);
        assert_eq!(day.feels_like_mean, 15.0);
        assert_eq!(day.humidity, 50);
        assert_eq!(day.wind_speed_max, 7.2);
        assert_eq!(day.condition, Condition::Rain);
        assert_eq!(day.icon, "10d");
    }

    #[test]
    fn test_normalize_forecast_absent_precipitation_is_exactly_zero() {
        let payload: RawForecastPayload = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2026-08-10", "2026-08-11"],
                "weather_code": [0, 0],
                "precipitation_sum": [null]
            }
        }))
        .unwrap();
        let days = normalize_forecast(payload).unwrap();
        assert_eq!(days[0].precipitation_probability, 0.0);
        assert_eq!(days[1].precipitation_probability, 0.0);
    }

    #[test]
    fn test_normalize_forecast_precipitation_clamped_to_unit_range() {
        let payload: RawForecastPayload = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2026-08-10"],
                "precipitation_sum": [5.3]
            }
        }))
        .unwrap();
        let days = normalize_forecast(payload).unwrap();
        assert_eq!(days[0].precipitation_probability, 1.0);
    }

    #[test]
    fn test_normalize_forecast_missing_slots_default() {
        // Columns shorter than `time` read as absent per day
        let payload: RawForecastPayload = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2026-08-10", "2026-08-11"],
                "weather_code": [95],
                "temperature_2m_max": [30.0]
            }
        }))
        .unwrap();
        let days = normalize_forecast(payload).unwrap();
        assert_eq!(days[0].condition, Condition::Thunderstorm);
        assert_eq!(days[1].condition, Condition::Unknown);
        assert_eq!(days[1].temperature_max, 0.0);
    }

    #[test]
    fn test_day_start_epoch() {
        // 2026-08-23T00:00:00Z
        assert_eq!(day_start_epoch("2026-08-23"), 1_787_443_200);
        assert_eq!(day_start_epoch("not-a-date"), 0);
    }

    #[tokio::test]
    async fn test_get_daily_requests_daily_variables() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("daily", DAILY_VARIABLES))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "daily": {
                    "time": ["2026-08-10"],
                    "weather_code": [3],
                    "temperature_2m_max": [22.0],
                    "temperature_2m_min": [12.0]
                }
            })))
            .mount(&server)
            .await;

        let service = ForecastService::new(Client::new(), &server.uri());
        let days = service.get_daily(51.5074, -0.1278).await.unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].description, "Overcast");
    }
}
