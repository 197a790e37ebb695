//! Reverse geocoding integration
//!
//! Resolves coordinates to postal addresses via
//! [Nominatim](https://nominatim.openstreetmap.org) or
//! [Photon](https://photon.komoot.io).
//!
//! # Architecture
//!
//! Both backends implement [`ReverseGeocodingProvider`]. The active backend is
//! chosen from [`GeocodingConfig::provider`] by [`create_provider`].
//! Each client keeps a short-lived address cache keyed by coordinates rounded
//! to five decimals.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingConfig, create_provider};
//!
//! let provider = create_provider(&GeocodingConfig::default())?;
//! if let Some(address) = provider.reverse_geocode(48.2082, 16.3738).await? {
//!     println!("{}", address.summary());
//! }
//! ```

mod cache;
mod config;
mod error;
mod models;
mod nominatim;
mod photon;
mod provider;

pub use config::{GeocodingConfig, ProviderKind};
pub use error::GeocodingError;
pub use models::AddressRecord;
pub use nominatim::NominatimClient;
pub use photon::PhotonClient;
pub use provider::ReverseGeocodingProvider;

use std::sync::Arc;

use tracing::debug;

/// Build the provider selected in the configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client cannot
/// be initialized.
pub fn create_provider(
    config: &GeocodingConfig,
) -> Result<Arc<dyn ReverseGeocodingProvider>, GeocodingError> {
    config
        .validate()
        .map_err(GeocodingError::ConfigurationError)?;

    debug!(provider = %config.provider, "Creating reverse geocoding provider");

    let provider: Arc<dyn ReverseGeocodingProvider> = match config.provider {
        ProviderKind::Nominatim => Arc::new(NominatimClient::new(config)?),
        ProviderKind::Photon => Arc::new(PhotonClient::new(config)?),
    };
    Ok(provider)
}
