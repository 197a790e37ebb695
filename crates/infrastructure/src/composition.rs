//! Wiring of adapters into application services

use std::sync::Arc;

use application::services::DepartmentFinder;
use tracing::debug;

use crate::adapters::{OverpassAdapter, ReverseGeocoderAdapter};
use crate::config::AppConfig;
use crate::error::InfrastructureError;

/// Build a [`DepartmentFinder`] backed by Overpass and the configured geocoder
///
/// # Errors
///
/// Returns an error if the configuration is invalid or an HTTP client fails
/// to initialize.
pub fn build_department_finder(config: &AppConfig) -> Result<DepartmentFinder, InfrastructureError> {
    config.validate()?;

    let geo_query = Arc::new(OverpassAdapter::new(&config.overpass)?);
    let geocoder = Arc::new(ReverseGeocoderAdapter::new(&config.geocoding)?);

    debug!(
        overpass = %config.overpass.base_url,
        geocoder = %config.geocoding.provider,
        timeout_secs = config.search.query_timeout_secs,
        concurrency = config.search.address_concurrency,
        "Building department finder"
    );

    Ok(DepartmentFinder::new(geo_query, geocoder)
        .with_timeout(config.search.query_timeout())
        .with_address_concurrency(config.search.address_concurrency))
}
