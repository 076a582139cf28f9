use std::time::Duration;

use async_trait::async_trait;

use crate::error::LocationErrorKind;

/// Options passed to the device position request.
#[derive(Debug, Clone, Copy)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Positions cached on the device no older than this are acceptable.
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Device position source. The host environment supplies the real
/// implementation; headless hosts use [`UnsupportedGeolocation`].
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> Result<GeoPosition, LocationErrorKind>;
}

/// Provider for hosts without a position source; always reports the
/// unsupported error kind so the startup fallback takes over.
pub struct UnsupportedGeolocation;

#[async_trait]
impl GeolocationProvider for UnsupportedGeolocation {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> Result<GeoPosition, LocationErrorKind> {
        tracing::debug!(
            high_accuracy = options.high_accuracy,
            timeout_ms = options.timeout.as_millis() as u64,
            maximum_age_ms = options.maximum_age.as_millis() as u64,
            "No position source on this host"
        );
        Err(LocationErrorKind::Unsupported)
    }
}
