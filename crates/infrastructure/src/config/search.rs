//! Search pipeline configuration

use std::time::Duration;

use application::services::{
    DEFAULT_ADDRESS_CONCURRENCY, DEFAULT_QUERY_TIMEOUT_SECS,
};
use domain::{
    DEFAULT_MAX_RADIUS_METERS, DEFAULT_STEP_METERS, Department, DomainError, SearchRequest,
};
use serde::{Deserialize, Serialize};

/// Radius expansion and resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAppConfig {
    /// Largest search radius in meters
    #[serde(default = "default_max_radius_m")]
    pub max_radius_m: u32,

    /// Radius increment per attempt in meters
    #[serde(default = "default_step_m")]
    pub step_m: u32,

    /// Upper bound for every outbound call in seconds
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Addresses resolved in parallel
    #[serde(default = "default_address_concurrency")]
    pub address_concurrency: usize,
}

const fn default_max_radius_m() -> u32 {
    DEFAULT_MAX_RADIUS_METERS
}

const fn default_step_m() -> u32 {
    DEFAULT_STEP_METERS
}

const fn default_query_timeout_secs() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

const fn default_address_concurrency() -> usize {
    DEFAULT_ADDRESS_CONCURRENCY
}

impl Default for SearchAppConfig {
    fn default() -> Self {
        Self {
            max_radius_m: default_max_radius_m(),
            step_m: default_step_m(),
            query_timeout_secs: default_query_timeout_secs(),
            address_concurrency: default_address_concurrency(),
        }
    }
}

impl SearchAppConfig {
    /// Per-call timeout
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Build a request using the configured radius policy
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range.
    pub fn request(
        &self,
        latitude: f64,
        longitude: f64,
        department: Department,
    ) -> Result<SearchRequest, DomainError> {
        Ok(SearchRequest::new(latitude, longitude, department)?
            .with_max_radius(self.max_radius_m)
            .with_step(self.step_m))
    }

    /// Validate the search settings
    pub fn validate(&self) -> Result<(), String> {
        if self.step_m == 0 {
            return Err("step_m must be greater than 0".to_string());
        }

        if self.max_radius_m < self.step_m {
            return Err(format!(
                "max_radius_m ({}) must be at least step_m ({})",
                self.max_radius_m, self.step_m
            ));
        }

        if self.query_timeout_secs == 0 {
            return Err("query_timeout_secs must be greater than 0".to_string());
        }

        if self.address_concurrency == 0 {
            return Err("address_concurrency must be greater than 0".to_string());
        }

        Ok(())
    }
}
