//! Address resolution
//!
//! Derives a postal address per candidate. Inline `addr:*` tags win; only
//! candidates without `addr:street` reach the reverse geocoder.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{GeoCandidate, LocationInfo, ResolvedAddress};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::ReverseGeocoderPort;

/// Default reverse-geocode timeout in seconds
pub const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 10;

/// Resolves candidate addresses from tags or a [`ReverseGeocoderPort`]
pub struct AddressResolver {
    geocoder: Arc<dyn ReverseGeocoderPort>,
    geocode_timeout: Duration,
}

impl fmt::Debug for AddressResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressResolver")
            .field("provider", &self.geocoder.provider_name())
            .field("geocode_timeout", &self.geocode_timeout)
            .finish()
    }
}

impl AddressResolver {
    /// Create a resolver backed by the given geocoder
    pub fn new(geocoder: Arc<dyn ReverseGeocoderPort>) -> Self {
        Self {
            geocoder,
            geocode_timeout: Duration::from_secs(DEFAULT_GEOCODE_TIMEOUT_SECS),
        }
    }

    /// Bound every reverse-geocode call by `geocode_timeout`
    #[must_use]
    pub const fn with_geocode_timeout(mut self, geocode_timeout: Duration) -> Self {
        self.geocode_timeout = geocode_timeout;
        self
    }

    /// Name of the geocoding provider in use
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.geocoder.provider_name()
    }

    /// Resolve the address of one candidate
    ///
    /// Calls the geocoder at most once. A missing or late answer degrades to
    /// a blank address.
    #[instrument(skip(self, candidate), fields(id = candidate.id))]
    pub async fn resolve(&self, candidate: &GeoCandidate) -> ResolvedAddress {
        if let Some(address) = ResolvedAddress::from_tags(&candidate.tags) {
            debug!("Using inline address tags");
            return address;
        }

        match timeout(
            self.geocode_timeout,
            self.geocoder.reverse_geocode(candidate.location()),
        )
        .await
        {
            Ok(Some(address)) => address,
            Ok(None) => {
                warn!("No address found, using blank address");
                ResolvedAddress::blank()
            },
            Err(_) => {
                warn!(timeout = ?self.geocode_timeout, "Reverse geocoding timed out, using blank address");
                ResolvedAddress::blank()
            },
        }
    }

    /// Resolve a candidate into its display record
    pub async fn resolve_location(&self, candidate: GeoCandidate) -> LocationInfo {
        let address = self.resolve(&candidate).await;
        LocationInfo::from_candidate(candidate, &address)
    }
}
