//! Reverse geocoding configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeocodingError;

/// Available reverse geocoding backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenStreetMap Nominatim
    #[default]
    Nominatim,
    /// Komoot Photon
    Photon,
}

impl ProviderKind {
    /// Configuration name of the provider
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
            Self::Photon => "photon",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GeocodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nominatim" => Ok(Self::Nominatim),
            "photon" => Ok(Self::Photon),
            other => Err(GeocodingError::ConfigurationError(format!(
                "unknown geocoding provider: {other}"
            ))),
        }
    }
}

/// Configuration for reverse geocoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Provider used to resolve addresses
    #[serde(default)]
    pub provider: ProviderKind,

    /// Base URL of the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,

    /// Base URL of the Photon API
    #[serde(default = "default_photon_base_url")]
    pub photon_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Identifying User-Agent (required by the Nominatim usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum delay between Nominatim requests in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Cache TTL in seconds (0 to disable)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached addresses
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_photon_base_url() -> String {
    "https://photon.komoot.io".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "I-need-help/1.0".to_string()
}

const fn default_min_interval_ms() -> u64 {
    1100
}

const fn default_cache_ttl_secs() -> u64 {
    3600
}

const fn default_cache_capacity() -> u64 {
    1000
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            nominatim_base_url: default_nominatim_base_url(),
            photon_base_url: default_photon_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            min_interval_ms: default_min_interval_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl GeocodingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 2,
            min_interval_ms: 0,
            cache_ttl_secs: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_secs > 0 && self.cache_capacity > 0
    }

    /// Base URL of the selected provider
    #[must_use]
    pub fn active_base_url(&self) -> &str {
        match self.provider {
            ProviderKind::Nominatim => &self.nominatim_base_url,
            ProviderKind::Photon => &self.photon_base_url,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.active_base_url().is_empty() {
            return Err(format!("{} base url must not be empty", self.provider));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}
