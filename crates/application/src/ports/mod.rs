//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geo_query_port;
mod reverse_geocoder_port;

pub use geo_query_port::GeoQueryPort;
#[cfg(test)]
pub use geo_query_port::MockGeoQueryPort;
pub use reverse_geocoder_port::ReverseGeocoderPort;
#[cfg(test)]
pub use reverse_geocoder_port::MockReverseGeocoderPort;
