use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::provider::{GeoPosition, GeolocationOptions, GeolocationProvider};
use crate::error::AppError;
use crate::forecast::{ForecastDay, ForecastService};
use crate::geocoding::{GeocodingService, SearchResult, service::SEARCH_RESULT_COUNT};
use crate::weather::{CurrentWeather, WeatherService};

/// Free-text queries shorter than this never reach the provider.
pub const MIN_SEARCH_LEN: usize = 2;

/// Where to fetch weather for.
#[derive(Debug, Clone)]
pub enum LocationHint {
    /// Ask the device for its position
    Device,
    Coordinates { latitude: f64, longitude: f64 },
    /// Resolve a typed city name through geocoding first
    City(String),
}

/// Both halves of a successful resolution; never published partially.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
}

/// Orchestrates location acquisition and the paired current/forecast fetch.
pub struct LocationResolver {
    geolocation: Arc<dyn GeolocationProvider>,
    weather: WeatherService,
    forecast: ForecastService,
    geocoding: GeocodingService,
    fallback: GeoPosition,
    /// The fixed-coordinate fallback is applied at most once per cold start.
    fallback_spent: AtomicBool,
}

impl LocationResolver {
    pub fn new(
        geolocation: Arc<dyn GeolocationProvider>,
        weather: WeatherService,
        forecast: ForecastService,
        geocoding: GeocodingService,
        fallback: GeoPosition,
    ) -> Self {
        Self {
            geolocation,
            weather,
            forecast,
            geocoding,
            fallback,
            fallback_spent: AtomicBool::new(false),
        }
    }

    /// Resolve a location hint and fetch current conditions plus the daily
    /// forecast, concurrently and both-or-fail. Failure is terminal per
    /// call; no retries happen here.
    pub async fn resolve_and_fetch(&self, hint: &LocationHint) -> Result<WeatherBundle, AppError> {
        match hint {
            LocationHint::Device => {
                let position = self
                    .geolocation
                    .current_position(&GeolocationOptions::default())
                    .await
                    .map_err(AppError::LocationUnavailable)?;
                tracing::debug!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "Device position acquired"
                );
                self.fetch_at(position, None).await
            }
            LocationHint::Coordinates {
                latitude,
                longitude,
            } => {
                self.fetch_at(
                    GeoPosition {
                        latitude: *latitude,
                        longitude: *longitude,
                    },
                    None,
                )
                .await
            }
            LocationHint::City(text) => {
                let place = self.geocoding.best_match(text).await?;
                let position = GeoPosition {
                    latitude: place.latitude,
                    longitude: place.longitude,
                };
                self.fetch_at(position, Some(place)).await
            }
        }
    }

    /// The startup flow: try the device first, and on any failure retry the
    /// whole fetch once against the fixed fallback coordinate. Later calls
    /// (explicit retries, searches) no longer get the substitution.
    pub async fn startup_fetch(&self) -> Result<WeatherBundle, AppError> {
        match self.resolve_and_fetch(&LocationHint::Device).await {
            Ok(bundle) => Ok(bundle),
            Err(err) => {
                if self.fallback_spent.swap(true, Ordering::SeqCst) {
                    return Err(err);
                }
                tracing::warn!(
                    error = %err,
                    latitude = self.fallback.latitude,
                    longitude = self.fallback.longitude,
                    "Device flow failed, retrying once with fallback coordinates"
                );
                self.resolve_and_fetch(&LocationHint::Coordinates {
                    latitude: self.fallback.latitude,
                    longitude: self.fallback.longitude,
                })
                .await
            }
        }
    }

    /// Autocomplete candidates for a typed query. Queries below
    /// [`MIN_SEARCH_LEN`] characters return empty without any request.
    pub async fn search_cities(&self, query: &str) -> Result<Vec<SearchResult>, AppError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }
        self.geocoding.search(query, SEARCH_RESULT_COUNT).await
    }

    async fn fetch_at(
        &self,
        position: GeoPosition,
        place: Option<SearchResult>,
    ) -> Result<WeatherBundle, AppError> {
        let (current, forecast) = tokio::try_join!(
            self.weather.get_current(position.latitude, position.longitude),
            self.forecast.get_daily(position.latitude, position.longitude),
        )?;

        // Coordinate fetches get a best-effort place label; when the reverse
        // lookup comes up empty the generic "Location" name stands.
        let current = match place {
            Some(p) => current.labeled(&p.name, &p.country_code),
            None => match self
                .geocoding
                .nearest_by_coords(position.latitude, position.longitude)
                .await
            {
                Some(p) => current.labeled(&p.name, &p.country_code),
                None => current,
            },
        };

        Ok(WeatherBundle { current, forecast })
    }
}
