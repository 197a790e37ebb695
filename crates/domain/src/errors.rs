//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the WGS84 range
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },

    /// Unknown emergency service category
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Search parameters violate their invariants
    #[error("Invalid search request: {0}")]
    InvalidSearchRequest(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid search request error
    pub fn invalid_search(message: impl Into<String>) -> Self {
        Self::InvalidSearchRequest(message.into())
    }
}
