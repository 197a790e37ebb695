//! Radius expansion search
//!
//! Queries the spatial backend over a growing sequence of radii
//! (`step, 2*step, ... <= max`) and stops at the first non-empty result.
//! Attempts are strictly sequential; a failed query ends the search.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{GeoCandidate, SearchRequest};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::distance_annotator::annotate_distances;
use crate::error::ApplicationError;
use crate::ports::GeoQueryPort;

/// Default per-query timeout in seconds
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

/// Terminal state of a radius expansion
#[derive(Debug, Clone, PartialEq)]
pub enum RadiusSearchResult {
    /// Candidates found at `radius_m`, with distances attached
    Found {
        /// Radius that produced the result
        radius_m: u32,
        /// Number of queries issued
        attempts: u32,
        /// Annotated candidates in backend order
        candidates: Vec<GeoCandidate>,
    },
    /// Every radius up to the maximum came back empty
    Exhausted {
        /// Number of queries issued
        attempts: u32,
    },
    /// A query failed or timed out
    Failed {
        /// Radius of the failed query
        radius_m: u32,
        /// Number of queries issued, including the failed one
        attempts: u32,
        /// Failure description
        reason: String,
    },
}

impl RadiusSearchResult {
    /// Number of backend queries issued
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Found { attempts, .. }
            | Self::Exhausted { attempts }
            | Self::Failed { attempts, .. } => *attempts,
        }
    }

    /// Candidates on success, `None` otherwise
    #[must_use]
    pub fn into_candidates(self) -> Option<Vec<GeoCandidate>> {
        match self {
            Self::Found { candidates, .. } => Some(candidates),
            Self::Exhausted { .. } | Self::Failed { .. } => None,
        }
    }
}

/// Sequential radius expansion over a [`GeoQueryPort`]
pub struct RadiusExpansionSearch {
    geo_query: Arc<dyn GeoQueryPort>,
    query_timeout: Duration,
}

impl fmt::Debug for RadiusExpansionSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadiusExpansionSearch")
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl RadiusExpansionSearch {
    /// Create a search over the given port
    pub fn new(geo_query: Arc<dyn GeoQueryPort>) -> Self {
        Self {
            geo_query,
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
        }
    }

    /// Bound every query by `query_timeout`
    #[must_use]
    pub const fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Run the expansion and report how it ended
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if the request violates
    /// `step > 0` and `max_radius >= step`. No query is issued in that case.
    #[instrument(skip(self), fields(center = %request.center, department = %request.department))]
    pub async fn run(&self, request: &SearchRequest) -> Result<RadiusSearchResult, ApplicationError> {
        request.validate()?;

        let mut attempts = 0;
        for radius_m in request.radii() {
            attempts += 1;
            debug!(radius_m, attempts, "Querying spatial backend");

            let queried = timeout(
                self.query_timeout,
                self.geo_query
                    .query(request.center, request.department, radius_m),
            )
            .await;

            let candidates = match queried {
                Ok(Ok(candidates)) => candidates,
                Ok(Err(e)) => {
                    warn!(radius_m, error = %e, "Spatial query failed, aborting search");
                    return Ok(RadiusSearchResult::Failed {
                        radius_m,
                        attempts,
                        reason: e.to_string(),
                    });
                },
                Err(_) => {
                    warn!(radius_m, timeout = ?self.query_timeout, "Spatial query timed out, aborting search");
                    return Ok(RadiusSearchResult::Failed {
                        radius_m,
                        attempts,
                        reason: format!("query timed out after {:?}", self.query_timeout),
                    });
                },
            };

            if !candidates.is_empty() {
                info!(radius_m, count = candidates.len(), "Found candidates");
                return Ok(RadiusSearchResult::Found {
                    radius_m,
                    attempts,
                    candidates: annotate_distances(&request.center, candidates),
                });
            }
        }

        info!(attempts, max_radius_m = request.max_radius_m, "No candidates within maximum radius");
        Ok(RadiusSearchResult::Exhausted { attempts })
    }

    /// Annotated candidates from the first non-empty radius
    ///
    /// `None` on exhaustion, on failure, and for invalid requests.
    pub async fn search(&self, request: &SearchRequest) -> Option<Vec<GeoCandidate>> {
        match self.run(request).await {
            Ok(result) => result.into_candidates(),
            Err(e) => {
                warn!(error = %e, "Rejected search request");
                None
            },
        }
    }
}
