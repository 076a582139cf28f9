use reqwest::Client;

use super::models::{normalize_search_result, RawGeocodingPayload, SearchResult};
use crate::error::{ensure_success, AppError};

/// How many autocomplete candidates to request.
pub const SEARCH_RESULT_COUNT: u8 = 5;

pub struct GeocodingService {
    client: Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Forward search by free-text name, ranked by the provider.
    pub async fn search(&self, query: &str, count: u8) -> Result<Vec<SearchResult>, AppError> {
        tracing::debug!(query, count, "Searching cities");

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("name", query),
                ("count", &count.to_string()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(AppError::from_transport)?;

        let response = ensure_success(response).await?;

        let payload: RawGeocodingPayload =
            response.json().await.map_err(AppError::from_transport)?;

        Ok(payload
            .results
            .unwrap_or_default()
            .into_iter()
            .map(normalize_search_result)
            .collect())
    }

    /// The single best match for a city name.
    pub async fn best_match(&self, name: &str) -> Result<SearchResult, AppError> {
        self.search(name, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::CityNotFound(name.to_string()))
    }

    /// Best-effort reverse lookup: the geocoding provider has no true
    /// reverse endpoint, so the nearest match is approximated by searching
    /// for the formatted coordinate string. Returns `None` on any failure
    /// so callers can keep a generic label instead.
    pub async fn nearest_by_coords(&self, latitude: f64, longitude: f64) -> Option<SearchResult> {
        let query = format!("{latitude:.2},{longitude:.2}");
        match self.search(&query, 1).await {
            Ok(results) => results.into_iter().next(),
            Err(err) => {
                tracing::warn!(error = %err, "Reverse lookup failed");
                None
            }
        }
    }
}
