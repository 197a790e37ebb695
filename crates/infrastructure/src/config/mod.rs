//! Application configuration
//!
//! Settings come from three layers, later ones overriding earlier ones:
//! built-in defaults, an optional TOML file and `INEEDHELP_*` environment
//! variables. Nested keys use a double underscore, e.g.
//! `INEEDHELP_SEARCH__MAX_RADIUS_M=5000` or `INEEDHELP_GEOCODING__PROVIDER=photon`.

mod logging;
mod search;

use std::path::Path;

use integration_geocoding::GeocodingConfig;
use integration_overpass::OverpassConfig;
use serde::{Deserialize, Serialize};

use crate::error::InfrastructureError;

pub use logging::{LogFormat, LoggingConfig};
pub use search::SearchAppConfig;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "INEEDHELP";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overpass API settings
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Reverse geocoding settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Radius expansion settings
    #[serde(default)]
    pub search: SearchAppConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and a file
    ///
    /// With `path` set the file must exist; otherwise `config.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, InfrastructureError> {
        Self::load_with_env(path, None)
    }

    /// Load configuration with an explicit environment map
    ///
    /// `env` replaces the process environment as the override source when
    /// given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, InfrastructureError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // e.g. INEEDHELP_OVERPASS__TIMEOUT_SECS
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration suitable for tests (short timeouts, no rate limiting or caching)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            overpass: OverpassConfig::for_testing(),
            geocoding: GeocodingConfig::for_testing(),
            search: SearchAppConfig {
                query_timeout_secs: 2,
                ..SearchAppConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Check every section for consistency
    pub fn validate(&self) -> Result<(), InfrastructureError> {
        self.overpass
            .validate()
            .map_err(|e| InfrastructureError::InvalidConfig(format!("overpass.{e}")))?;
        self.geocoding
            .validate()
            .map_err(|e| InfrastructureError::InvalidConfig(format!("geocoding.{e}")))?;
        self.search
            .validate()
            .map_err(|e| InfrastructureError::InvalidConfig(format!("search.{e}")))?;
        Ok(())
    }
}
