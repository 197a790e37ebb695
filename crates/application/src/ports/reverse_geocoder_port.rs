//! Reverse geocoding port
//!
//! Defines the interface for turning coordinates into postal addresses.
//! Adapters in the infrastructure layer implement this port on top of
//! interchangeable providers (Nominatim, Photon).

use async_trait::async_trait;
use domain::{GeoLocation, ResolvedAddress};
#[cfg(test)]
use mockall::automock;

/// Port for reverse geocoding
///
/// Never fails: a missing address, a non-success status or a transport error
/// all yield `None`, and implementations log the cause.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReverseGeocoderPort: Send + Sync {
    /// Resolve a coordinate pair to an address, if one is known
    async fn reverse_geocode(&self, location: GeoLocation) -> Option<ResolvedAddress>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;

    /// Name of the underlying provider
    fn provider_name(&self) -> &'static str;
}
