//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! Overpass and reverse geocoding integrations, loads configuration and
//! sets up logging.

pub mod adapters;
pub mod composition;
pub mod config;
pub mod error;
pub mod telemetry;

pub use adapters::*;
pub use composition::build_department_finder;
pub use config::{AppConfig, LogFormat, LoggingConfig, SearchAppConfig};
pub use error::InfrastructureError;
pub use telemetry::{TelemetryError, init_logging};
