//! Adapters implementing application ports
//!
//! Each adapter wraps an integration crate client and translates between its
//! models and the domain types the ports speak.

mod geocoding_adapter;
mod overpass_adapter;

pub use geocoding_adapter::ReverseGeocoderAdapter;
pub use overpass_adapter::{OverpassAdapter, filters_for};
