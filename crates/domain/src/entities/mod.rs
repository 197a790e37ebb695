//! Domain entities - Candidates and resolved locations

mod geo_candidate;
mod location_info;

pub use geo_candidate::{
    GeoCandidate, OsmTags, TAG_CITY, TAG_COUNTRY, TAG_HOUSE_NAME, TAG_HOUSE_NUMBER, TAG_NAME,
    TAG_PHONE, TAG_POSTCODE, TAG_STREET, TAG_WEBSITE, TagValue,
};
pub use location_info::{
    LocationInfo, ResolvedAddress, UNNAMED, compare_distance, display_name, format_address,
    sort_by_distance,
};
