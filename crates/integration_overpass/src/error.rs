//! Overpass error types

use thiserror::Error;

/// Errors that can occur while querying the Overpass API
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Connection to the Overpass server failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Server answered with an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not valid Overpass JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the server)
        retry_after_secs: Option<u64>,
    },

    /// Server is overloaded or behind a failing gateway
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Query could not be built
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OverpassError {
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
}
