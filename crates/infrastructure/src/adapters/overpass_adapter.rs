//! Overpass adapter - Implements GeoQueryPort using integration_overpass

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeoQueryPort;
use async_trait::async_trait;
use domain::{Department, GeoCandidate, GeoLocation};
use integration_overpass::{
    HttpOverpassClient, OverpassClient, OverpassConfig, OverpassElement, OverpassQuery, TagFilter,
};
use tracing::{debug, instrument, warn};

use crate::error::InfrastructureError;

/// OSM tag filters covering every facility type of a department
pub fn filters_for(department: Department) -> Vec<TagFilter> {
    match department {
        Department::Police => vec![TagFilter::new("amenity", "police")],
        Department::Fire => vec![TagFilter::new("amenity", "fire_station")],
        Department::Ambulance => vec![
            TagFilter::new("emergency", "ambulance_station"),
            TagFilter::new("amenity", "hospital"),
        ],
    }
}

/// Adapter for facility lookups against the Overpass API
pub struct OverpassAdapter {
    client: Arc<dyn OverpassClient>,
}

impl std::fmt::Debug for OverpassAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassAdapter")
            .field("client", &"OverpassClient")
            .finish()
    }
}

impl OverpassAdapter {
    /// Create an adapter with an HTTP client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &OverpassConfig) -> Result<Self, InfrastructureError> {
        config
            .validate()
            .map_err(|e| InfrastructureError::InvalidConfig(format!("overpass.{e}")))?;
        Ok(Self::with_client(Arc::new(HttpOverpassClient::new(config)?)))
    }

    /// Create an adapter over an existing client
    pub fn with_client(client: Arc<dyn OverpassClient>) -> Self {
        Self { client }
    }

    fn to_candidate(element: OverpassElement) -> GeoCandidate {
        GeoCandidate::new(element.id, element.lat, element.lon, element.tags)
    }
}

#[async_trait]
impl GeoQueryPort for OverpassAdapter {
    #[instrument(skip(self), fields(center = %center))]
    async fn query(
        &self,
        center: GeoLocation,
        department: Department,
        radius_m: u32,
    ) -> Result<Vec<GeoCandidate>, ApplicationError> {
        let query = OverpassQuery::around(center.latitude(), center.longitude(), radius_m)
            .nodes(filters_for(department));

        let response = self.client.query_nodes(&query).await.map_err(|e| {
            warn!(error = %e, retryable = e.is_retryable(), "Overpass query failed");
            ApplicationError::network(format!("Overpass query failed: {e}"))
        })?;

        debug!(
            count = response.elements.len(),
            dropped = response.dropped,
            "Overpass query returned elements"
        );

        Ok(response
            .elements
            .into_iter()
            .map(Self::to_candidate)
            .collect())
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
