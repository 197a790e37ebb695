//! Overpass API integration
//!
//! Looks up OpenStreetMap nodes around a coordinate via the
//! [Overpass API](https://overpass-api.de). Used to find police stations,
//! fire stations, ambulance stations and hospitals near the caller.
//!
//! # Architecture
//!
//! [`OverpassClient`] defines the interface, implemented by
//! [`HttpOverpassClient`]. Queries are assembled with [`OverpassQuery`] and
//! sent as a form-encoded `data=` POST body.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_overpass::{HttpOverpassClient, OverpassClient, OverpassConfig, OverpassQuery, TagFilter};
//!
//! let client = HttpOverpassClient::new(&OverpassConfig::default())?;
//! let query = OverpassQuery::around(48.2, 16.3, 2000).node(TagFilter::new("amenity", "police"));
//! let response = client.query_nodes(&query).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod query;

pub use client::{HttpOverpassClient, OverpassClient};
pub use config::OverpassConfig;
pub use error::OverpassError;
pub use models::{OverpassElement, OverpassResponse};
pub use query::{OverpassQuery, TagFilter};
