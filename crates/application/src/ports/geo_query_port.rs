//! Spatial query port
//!
//! Defines the interface for looking up emergency facilities around a point.
//! Adapters in the infrastructure layer implement this port using the
//! Overpass API.

use async_trait::async_trait;
use domain::{Department, GeoCandidate, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for spatial facility queries
///
/// One call issues exactly one backend request covering every facility type
/// relevant to the department. Implementations drop malformed records and
/// report any transport, status or parse failure as
/// [`ApplicationError::NetworkFailure`]. Candidates are returned without
/// distances.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeoQueryPort: Send + Sync {
    /// Find facilities for `department` within `radius_m` meters of `center`
    async fn query(
        &self,
        center: GeoLocation,
        department: Department,
        radius_m: u32,
    ) -> Result<Vec<GeoCandidate>, ApplicationError>;

    /// Check if the spatial backend is reachable
    async fn is_available(&self) -> bool;
}
