use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Why device geolocation could not produce a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationErrorKind {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

impl std::fmt::Display for LocationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::PermissionDenied => "location access denied by user",
            Self::PositionUnavailable => "location information is unavailable",
            Self::Timeout => "location request timed out",
            Self::Unsupported => "geolocation is not supported on this device",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Location unavailable: {0}")]
    LocationUnavailable(LocationErrorKind),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid provider response: {0}")]
    MalformedResponse(String),

    #[error("Network error. Please check your internet connection.")]
    Network(#[source] reqwest::Error),

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Provider error: {0}")]
    Provider(String),
}

impl AppError {
    /// Classify a transport-level failure: body decode problems are the
    /// provider's fault, everything else is the network's.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::MalformedResponse(err.to_string())
        } else {
            AppError::Network(err)
        }
    }
}

/// Error body Open-Meteo returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ProviderFault {
    reason: Option<String>,
}

/// Map a non-success provider response to the error taxonomy, pulling the
/// provider-supplied reason out of the body when there is one.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AppError::RateLimited);
    }

    if status == StatusCode::BAD_REQUEST {
        return Err(AppError::Provider(
            "Invalid request. Please check your location.".to_string(),
        ));
    }

    let reason = response
        .json::<ProviderFault>()
        .await
        .ok()
        .and_then(|fault| fault.reason)
        .unwrap_or_else(|| format!("HTTP {status}"));

    Err(AppError::Provider(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_error_kind_messages() {
        assert_eq!(
            LocationErrorKind::PermissionDenied.to_string(),
            "location access denied by user"
        );
        assert_eq!(
            LocationErrorKind::Timeout.to_string(),
            "location request timed out"
        );
    }

    #[test]
    fn test_rate_limited_message_is_user_readable() {
        let err = AppError::RateLimited;
        assert_eq!(
            err.to_string(),
            "Too many requests. Please try again later."
        );
    }
}
