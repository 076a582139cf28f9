use serde::{Deserialize, Serialize};

// ============================================================================
// Raw Open-Meteo Geocoding Payload (Internal)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RawGeocodingPayload {
    /// Absent entirely when the query matched nothing
    #[serde(default)]
    pub results: Option<Vec<RawGeoEntry>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGeoEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    /// First-level administrative area, e.g. state or region
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

// ============================================================================
// Canonical Model
// ============================================================================

/// A geocoding candidate, used for both autocomplete and the best-effort
/// nearest-match reverse lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub name: String,
    pub country_code: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Total field rename/defaulting from a raw geocoding entry.
pub fn normalize_search_result(raw: RawGeoEntry) -> SearchResult {
    SearchResult {
        name: raw.name.unwrap_or_default(),
        country_code: raw.country_code.or(raw.country).unwrap_or_default(),
        region: raw.admin1.filter(|s| !s.is_empty()),
        latitude: raw.latitude.unwrap_or(0.0),
        longitude: raw.longitude.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_search_result_defaults() {
        let result = normalize_search_result(RawGeoEntry::default());
        assert_eq!(result.name, "");
        assert_eq!(result.country_code, "");
        assert_eq!(result.region, None);
        assert_eq!(result.latitude, 0.0);
        assert_eq!(result.longitude, 0.0);
    }

    #[test]
    fn test_normalize_search_result_prefers_country_code() {
        let raw = RawGeoEntry {
            name: Some("London".to_string()),
            country: Some("United Kingdom".to_string()),
            country_code: Some("GB".to_string()),
            admin1: Some("England".to_string()),
            latitude: Some(51.5074),
            longitude: Some(-0.1278),
        };
        let result = normalize_search_result(raw);
        assert_eq!(result.country_code, "GB");
        assert_eq!(result.region.as_deref(), Some("England"));
    }
}
