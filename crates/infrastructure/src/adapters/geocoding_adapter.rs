//! Reverse geocoding adapter - Implements ReverseGeocoderPort using integration_geocoding

use std::sync::Arc;

use application::ports::ReverseGeocoderPort;
use async_trait::async_trait;
use domain::{GeoLocation, ResolvedAddress};
use integration_geocoding::{
    AddressRecord, GeocodingConfig, ReverseGeocodingProvider, create_provider,
};
use tracing::{debug, instrument, warn};

use crate::error::InfrastructureError;

/// Adapter for reverse geocoding via Nominatim or Photon
///
/// Provider errors are logged and reported as "no address".
pub struct ReverseGeocoderAdapter {
    provider: Arc<dyn ReverseGeocodingProvider>,
}

impl std::fmt::Debug for ReverseGeocoderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReverseGeocoderAdapter")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl ReverseGeocoderAdapter {
    /// Create an adapter for the provider selected in `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &GeocodingConfig) -> Result<Self, InfrastructureError> {
        Ok(Self::from_provider(create_provider(config)?))
    }

    /// Create an adapter over an existing provider
    pub fn from_provider(provider: Arc<dyn ReverseGeocodingProvider>) -> Self {
        Self { provider }
    }

    fn to_resolved(record: AddressRecord) -> ResolvedAddress {
        ResolvedAddress {
            country: record.country,
            postcode: record.postcode,
            city: record.city,
            street: record.street,
            house: record.house_number,
        }
    }
}

#[async_trait]
impl ReverseGeocoderPort for ReverseGeocoderAdapter {
    #[instrument(skip(self), fields(location = %location, provider = self.provider.provider_name()))]
    async fn reverse_geocode(&self, location: GeoLocation) -> Option<ResolvedAddress> {
        match self
            .provider
            .reverse_geocode(location.latitude(), location.longitude())
            .await
        {
            Ok(Some(record)) => {
                debug!(address = %record.summary(), "Reverse geocoded");
                Some(Self::to_resolved(record))
            },
            Ok(None) => {
                debug!("No address known for location");
                None
            },
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Reverse geocoding failed");
                None
            },
        }
    }

    async fn is_available(&self) -> bool {
        self.provider.is_healthy().await
    }

    fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }
}
