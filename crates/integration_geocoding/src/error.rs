//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during reverse geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Geocoding rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the API)
        retry_after_secs: Option<u64>,
    },

    /// Service is temporarily unavailable
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Geocoding configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Geocoding request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl GeocodingError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    pub(crate) fn from_status(status: reqwest::StatusCode, retry_after: Option<u64>) -> Self {
        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded {
                retry_after_secs: retry_after,
            },
            reqwest::StatusCode::BAD_GATEWAY
            | reqwest::StatusCode::SERVICE_UNAVAILABLE
            | reqwest::StatusCode::GATEWAY_TIMEOUT => {
                Self::ServiceUnavailable(format!("HTTP {status}"))
            },
            _ => Self::RequestFailed(format!("HTTP {status}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeocodingError::ConnectionFailed("x".to_string()).is_retryable());
        assert!(GeocodingError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            GeocodingError::RateLimitExceeded {
                retry_after_secs: Some(1)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GeocodingError::ParseError("x".to_string()).is_retryable());
        assert!(!GeocodingError::RequestFailed("HTTP 404".to_string()).is_retryable());
        assert!(!GeocodingError::ConfigurationError("x".to_string()).is_retryable());
    }

    #[test]
    fn test_from_status() {
        assert!(matches!(
            GeocodingError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS, Some(2)),
            GeocodingError::RateLimitExceeded {
                retry_after_secs: Some(2)
            }
        ));
        assert!(matches!(
            GeocodingError::from_status(reqwest::StatusCode::BAD_GATEWAY, None),
            GeocodingError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            GeocodingError::from_status(reqwest::StatusCode::NOT_FOUND, None),
            GeocodingError::RequestFailed(_)
        ));
    }
}
