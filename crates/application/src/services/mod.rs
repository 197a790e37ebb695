//! Application services - Use case implementations

mod address_resolver;
mod department_finder;
mod distance_annotator;
mod radius_expansion;

pub use address_resolver::{AddressResolver, DEFAULT_GEOCODE_TIMEOUT_SECS};
pub use department_finder::{
    BackendStatus, DEFAULT_ADDRESS_CONCURRENCY, DepartmentFinder, SearchOutcome,
};
pub use distance_annotator::annotate_distances;
pub use radius_expansion::{DEFAULT_QUERY_TIMEOUT_SECS, RadiusExpansionSearch, RadiusSearchResult};
