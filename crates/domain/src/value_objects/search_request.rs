//! Nearest-department search parameters

use serde::{Deserialize, Serialize};

use super::{Department, GeoLocation};
use crate::errors::DomainError;

/// Default upper bound of the search radius in meters
pub const DEFAULT_MAX_RADIUS_METERS: u32 = 20_000;

/// Default radius increment in meters
pub const DEFAULT_STEP_METERS: u32 = 2_000;

/// Parameters of one nearest-department search
///
/// Invariant (checked by [`SearchRequest::validate`]): `step_m > 0` and
/// `max_radius_m >= step_m`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query center
    pub center: GeoLocation,
    /// Service category
    pub department: Department,
    /// Largest radius to attempt, in meters (inclusive)
    pub max_radius_m: u32,
    /// Radius increment between attempts, in meters
    pub step_m: u32,
}

impl SearchRequest {
    /// Create a request with the default radius policy
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` for out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64, department: Department) -> Result<Self, DomainError> {
        Ok(Self {
            center: GeoLocation::new(latitude, longitude)?,
            department,
            max_radius_m: DEFAULT_MAX_RADIUS_METERS,
            step_m: DEFAULT_STEP_METERS,
        })
    }

    /// Set the maximum radius
    #[must_use]
    pub const fn with_max_radius(mut self, max_radius_m: u32) -> Self {
        self.max_radius_m = max_radius_m;
        self
    }

    /// Set the radius step
    #[must_use]
    pub const fn with_step(mut self, step_m: u32) -> Self {
        self.step_m = step_m;
        self
    }

    /// Check the radius invariants
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.step_m == 0 {
            return Err(DomainError::invalid_search("step must be greater than 0"));
        }
        if self.max_radius_m < self.step_m {
            return Err(DomainError::invalid_search(format!(
                "max radius {}m must not be smaller than step {}m",
                self.max_radius_m, self.step_m
            )));
        }
        Ok(())
    }

    /// Radii to attempt in order: `step, 2*step, ...` up to and including `max_radius_m`
    ///
    /// Yields nothing when `step_m` is zero.
    pub fn radii(&self) -> impl Iterator<Item = u32> + use<> {
        let step = self.step_m;
        let max = self.max_radius_m;
        std::iter::successors((step > 0).then_some(step), move |radius| {
            radius.checked_add(step)
        })
        .take_while(move |radius| *radius <= max)
    }
}
