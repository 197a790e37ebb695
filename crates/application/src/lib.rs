//! Application layer - Use cases and orchestration
//!
//! Contains the nearest-department pipeline (radius expansion, distance
//! annotation, address resolution) and the port definitions it talks through.
//! Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
