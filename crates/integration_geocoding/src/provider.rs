//! Reverse geocoding provider trait

use async_trait::async_trait;

use crate::{AddressRecord, GeocodingError};

/// Trait for reverse geocoding providers
///
/// Implemented by all backends (Nominatim, Photon).
#[async_trait]
pub trait ReverseGeocodingProvider: Send + Sync {
    /// Resolve coordinates to a structured address
    ///
    /// Returns `Ok(None)` when the provider knows no address for the point.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success statuses or
    /// unparseable responses.
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<AddressRecord>, GeocodingError>;

    /// Check if the provider is healthy/reachable
    async fn is_healthy(&self) -> bool;

    /// Get the provider name (e.g., "nominatim", "photon")
    fn provider_name(&self) -> &'static str;
}
