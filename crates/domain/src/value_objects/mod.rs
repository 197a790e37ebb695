//! Value Objects - Immutable, identity-less domain primitives

mod department;
mod geo_location;
mod search_request;

pub use department::Department;
pub use geo_location::{EARTH_RADIUS_METERS, GeoLocation};
pub use search_request::{DEFAULT_MAX_RADIUS_METERS, DEFAULT_STEP_METERS, SearchRequest};
