//! Infrastructure errors

use integration_geocoding::GeocodingError;
use integration_overpass::OverpassError;
use thiserror::Error;

/// Errors raised while wiring up the infrastructure
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Configuration could not be loaded
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Overpass client setup failed
    #[error(transparent)]
    Overpass(#[from] OverpassError),

    /// Geocoding provider setup failed
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),
}
