//! Nearest department finder
//!
//! Public entry point of the pipeline: radius expansion, address resolution
//! for every candidate, then a stable sort by ascending distance with unknown
//! distances last.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{Department, LocationInfo, SearchRequest, sort_by_distance};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::address_resolver::AddressResolver;
use super::radius_expansion::{RadiusExpansionSearch, RadiusSearchResult};
use crate::error::ApplicationError;
use crate::ports::{GeoQueryPort, ReverseGeocoderPort};

/// Default number of concurrent address resolutions
pub const DEFAULT_ADDRESS_CONCURRENCY: usize = 4;

/// Outcome of a nearest-department search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Facilities sorted by ascending distance
    Found(Vec<LocationInfo>),
    /// Nothing within the maximum radius
    NotFound,
    /// The spatial backend failed
    NetworkError(String),
}

impl SearchOutcome {
    /// Collapse to the list, `None` for both not-found and network errors
    #[must_use]
    pub fn into_option(self) -> Option<Vec<LocationInfo>> {
        match self {
            Self::Found(locations) => Some(locations),
            Self::NotFound | Self::NetworkError(_) => None,
        }
    }

    /// Whether facilities were found
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Reachability of the backends behind a finder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    /// Spatial backend reachable
    pub spatial: bool,
    /// Reverse geocoder reachable
    pub geocoder: bool,
    /// Name of the reverse geocoding provider
    pub geocoder_provider: &'static str,
}

/// Finds and describes the nearest facilities of a department
pub struct DepartmentFinder {
    geo_query: Arc<dyn GeoQueryPort>,
    geocoder: Arc<dyn ReverseGeocoderPort>,
    search: RadiusExpansionSearch,
    resolver: AddressResolver,
    address_concurrency: usize,
}

impl fmt::Debug for DepartmentFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepartmentFinder")
            .field("search", &self.search)
            .field("address_concurrency", &self.address_concurrency)
            .finish_non_exhaustive()
    }
}

impl DepartmentFinder {
    /// Create a finder over the given ports
    pub fn new(geo_query: Arc<dyn GeoQueryPort>, geocoder: Arc<dyn ReverseGeocoderPort>) -> Self {
        Self {
            search: RadiusExpansionSearch::new(Arc::clone(&geo_query)),
            resolver: AddressResolver::new(Arc::clone(&geocoder)),
            geo_query,
            geocoder,
            address_concurrency: DEFAULT_ADDRESS_CONCURRENCY,
        }
    }

    /// Bound every outbound call (spatial query and reverse geocode)
    #[must_use]
    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.search = self.search.with_query_timeout(call_timeout);
        self.resolver = self.resolver.with_geocode_timeout(call_timeout);
        self
    }

    /// Limit concurrent address resolutions (at least one)
    #[must_use]
    pub fn with_address_concurrency(mut self, concurrency: usize) -> Self {
        self.address_concurrency = concurrency.max(1);
        self
    }

    /// Search with full outcome reporting
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` for an invalid request.
    #[instrument(skip(self), fields(center = %request.center, department = %request.department))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, ApplicationError> {
        let result = self.search.run(request).await?;
        let attempts = result.attempts();
        let candidates = match result {
            RadiusSearchResult::Found {
                radius_m,
                candidates,
                ..
            } => {
                debug!(radius_m, attempts, count = candidates.len(), "Candidates found");
                candidates
            },
            RadiusSearchResult::Exhausted { .. } => {
                info!(attempts, "No department found");
                return Ok(SearchOutcome::NotFound);
            },
            RadiusSearchResult::Failed {
                radius_m, reason, ..
            } => {
                warn!(radius_m, attempts, reason = %reason, "Search aborted");
                return Ok(SearchOutcome::NetworkError(reason));
            },
        };

        let resolver = &self.resolver;
        let mut locations: Vec<LocationInfo> = stream::iter(candidates)
            .map(|candidate| async move { resolver.resolve_location(candidate).await })
            .buffered(self.address_concurrency)
            .collect()
            .await;

        sort_by_distance(&mut locations);

        info!(count = locations.len(), "Resolved departments");
        Ok(SearchOutcome::Found(locations))
    }

    /// Nearest facilities, or `None` when none were found or a query failed
    pub async fn find_request(&self, request: &SearchRequest) -> Option<Vec<LocationInfo>> {
        match self.search(request).await {
            Ok(outcome) => outcome.into_option(),
            Err(e) => {
                warn!(error = %e, "Rejected search request");
                None
            },
        }
    }

    /// Nearest facilities around a coordinate
    ///
    /// `max_radius_m` and `step_m` default to 20000 and 2000 meters. Invalid
    /// coordinates or radius settings yield `None`.
    pub async fn find(
        &self,
        latitude: f64,
        longitude: f64,
        department: Department,
        max_radius_m: Option<u32>,
        step_m: Option<u32>,
    ) -> Option<Vec<LocationInfo>> {
        let mut request = match SearchRequest::new(latitude, longitude, department) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Rejected search coordinates");
                return None;
            },
        };
        if let Some(max_radius_m) = max_radius_m {
            request = request.with_max_radius(max_radius_m);
        }
        if let Some(step_m) = step_m {
            request = request.with_step(step_m);
        }
        self.find_request(&request).await
    }

    /// Probe both backends
    pub async fn check_backends(&self) -> BackendStatus {
        let (spatial, geocoder) =
            tokio::join!(self.geo_query.is_available(), self.geocoder.is_available());
        BackendStatus {
            spatial,
            geocoder,
            geocoder_provider: self.geocoder.provider_name(),
        }
    }
}
