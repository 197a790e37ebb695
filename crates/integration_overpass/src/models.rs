//! Overpass response models

use domain::{OsmTags, TagValue};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::OverpassError;

/// A node returned by the Overpass API
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassElement {
    /// OpenStreetMap node id
    pub id: i64,
    /// Latitude in WGS84 degrees
    pub lat: f64,
    /// Longitude in WGS84 degrees
    pub lon: f64,
    /// Node tags
    pub tags: OsmTags,
}

/// Parsed Overpass response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverpassResponse {
    /// Well-formed elements, in server order
    pub elements: Vec<OverpassElement>,
    /// Runtime remark reported by the server (timeouts, overload)
    pub remark: Option<String>,
    /// Number of elements dropped for missing `id`, `lat` or `lon`
    pub dropped: usize,
}

impl OverpassResponse {
    /// Parse a response body
    ///
    /// A body without an `elements` array yields no elements. Elements lacking
    /// `id`, `lat` or `lon` are skipped.
    ///
    /// # Errors
    ///
    /// Returns `OverpassError::ParseError` if the body is not valid JSON.
    /// Valid JSON of any other shape than an object yields no elements.
    pub fn parse(body: &str) -> Result<Self, OverpassError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| OverpassError::ParseError(e.to_string()))?;

        let Value::Object(root) = value else {
            debug!("Overpass response is not an object, treating as empty");
            return Ok(Self::default());
        };

        let remark = root
            .get("remark")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        let raw_elements = match root.get("elements") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };

        let elements: Vec<OverpassElement> = raw_elements
            .iter()
            .filter_map(|item| RawElement::deserialize(item).ok())
            .filter_map(RawElement::into_element)
            .collect();

        let dropped = raw_elements.len() - elements.len();
        if dropped > 0 {
            debug!(dropped, "Skipped malformed Overpass elements");
        }

        Ok(Self {
            elements,
            remark,
            dropped,
        })
    }

    /// Whether no element was returned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawElement {
    id: Option<i64>,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: Option<Map<String, Value>>,
}

impl RawElement {
    fn into_element(self) -> Option<OverpassElement> {
        let tags = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| tag_value(value).map(|value| (key, value)))
            .collect();

        Some(OverpassElement {
            id: self.id?,
            lat: self.lat?,
            lon: self.lon?,
            tags,
        })
    }
}

fn tag_value(value: Value) -> Option<TagValue> {
    match value {
        Value::String(text) => Some(TagValue::Text(text)),
        Value::Bool(flag) => Some(TagValue::Bool(flag)),
        Value::Number(number) => number.as_f64().map(TagValue::Number),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
