//! Overpass QL query builder

use std::fmt;

use crate::error::OverpassError;

/// A `[key=value]` node filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    key: String,
    value: String,
}

impl TagFilter {
    /// Create a filter matching nodes whose `key` tag equals `value`
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Tag key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Tag value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}={}]", self.key, self.value)
    }
}

/// A union of node filters around one center point
///
/// Renders as
/// `[out:json][timeout:T];(node[k=v](around:R,LAT,LON);...);out body;`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    latitude: f64,
    longitude: f64,
    radius_m: u32,
    filters: Vec<TagFilter>,
    timeout_secs: Option<u64>,
}

impl OverpassQuery {
    /// Start a query for nodes within `radius_m` meters of a point
    #[must_use]
    pub const fn around(latitude: f64, longitude: f64, radius_m: u32) -> Self {
        Self {
            latitude,
            longitude,
            radius_m,
            filters: Vec::new(),
            timeout_secs: None,
        }
    }

    /// Add a node filter to the union
    #[must_use]
    pub fn node(mut self, filter: TagFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add several node filters to the union
    #[must_use]
    pub fn nodes(mut self, filters: impl IntoIterator<Item = TagFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Set the server-side timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Search radius in meters
    #[must_use]
    pub const fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// Node filters in the union
    #[must_use]
    pub fn filters(&self) -> &[TagFilter] {
        &self.filters
    }

    /// Render the query as Overpass QL
    ///
    /// # Errors
    ///
    /// Returns `OverpassError::InvalidQuery` when no filter was added.
    pub fn build(&self) -> Result<String, OverpassError> {
        if self.filters.is_empty() {
            return Err(OverpassError::InvalidQuery(
                "at least one node filter is required".to_string(),
            ));
        }

        let mut query = String::from("[out:json]");
        if let Some(timeout) = self.timeout_secs {
            query.push_str(&format!("[timeout:{timeout}]"));
        }
        query.push_str(";(");
        for filter in &self.filters {
            query.push_str(&format!(
                "node{filter}(around:{},{},{});",
                self.radius_m, self.latitude, self.longitude
            ));
        }
        query.push_str(");out body;");
        Ok(query)
    }
}
