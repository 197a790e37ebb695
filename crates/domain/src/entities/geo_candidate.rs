//! Raw facility candidates returned by a spatial query

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Tag key of the facility's display name
pub const TAG_NAME: &str = "name";
/// Tag key of the street name
pub const TAG_STREET: &str = "addr:street";
/// Tag key of the house number
pub const TAG_HOUSE_NUMBER: &str = "addr:housenumber";
/// Tag key of the postal code
pub const TAG_POSTCODE: &str = "addr:postcode";
/// Tag key of the city
pub const TAG_CITY: &str = "addr:city";
/// Tag key of the country
pub const TAG_COUNTRY: &str = "addr:country";
/// Tag key of the building name
pub const TAG_HOUSE_NAME: &str = "addr:housename";
/// Tag key of the phone number
pub const TAG_PHONE: &str = "phone";
/// Tag key of the website
pub const TAG_WEBSITE: &str = "website";

/// A single tag value as delivered by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Boolean tag
    Bool(bool),
    /// Numeric tag
    Number(f64),
    /// Textual tag (the common case)
    Text(String),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Key/value tags attached to a candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OsmTags(BTreeMap<String, TagValue>);

impl OsmTags {
    /// Create an empty tag set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a tag
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TagValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw tag value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    /// Tag value rendered as a string
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key).map(ToString::to_string)
    }

    /// Tag value rendered as a string, `None` for missing or blank values
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get_str(key).filter(|value| !value.trim().is_empty())
    }

    /// Number of tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no tags
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<TagValue>> FromIterator<(K, V)> for OsmTags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// A raw facility record from the spatial backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    /// Provider-assigned identifier, unique within one query
    pub id: i64,
    /// Latitude in WGS84 degrees
    pub latitude: f64,
    /// Longitude in WGS84 degrees
    pub longitude: f64,
    /// Facility tags
    #[serde(default)]
    pub tags: OsmTags,
    /// Meters from the search center, set once by distance annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl GeoCandidate {
    /// Create a candidate without distance
    #[must_use]
    pub const fn new(id: i64, latitude: f64, longitude: f64, tags: OsmTags) -> Self {
        Self {
            id,
            latitude,
            longitude,
            tags,
            distance: None,
        }
    }

    /// Candidate position
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.latitude, self.longitude)
    }

    /// Copy of this candidate with its distance set
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_values_render_as_strings() {
        let tags = OsmTags::new()
            .with("name", "Wache Mitte")
            .with("addr:housenumber", TagValue::Number(5.0))
            .with("wheelchair", TagValue::Bool(true));

        assert_eq!(tags.get_str("name").as_deref(), Some("Wache Mitte"));
        assert_eq!(tags.get_str("addr:housenumber").as_deref(), Some("5"));
        assert_eq!(tags.get_str("wheelchair").as_deref(), Some("true"));
        assert!(tags.get_str("phone").is_none());
    }

    #[test]
    fn blank_tags_are_not_present() {
        let tags = OsmTags::new().with("addr:street", "  ");
        assert!(tags.get_non_empty("addr:street").is_none());
        assert_eq!(tags.get_str("addr:street").as_deref(), Some("  "));
    }

    #[test]
    fn tags_deserialize_mixed_values() {
        let json = r#"{"name": "Spital", "beds": 120, "emergency": "yes", "24/7": true}"#;
        let tags: OsmTags = serde_json::from_str(json).unwrap();
        assert_eq!(tags.len(), 4);
        assert_eq!(tags.get("beds"), Some(&TagValue::Number(120.0)));
        assert_eq!(tags.get("24/7"), Some(&TagValue::Bool(true)));
        assert_eq!(tags.get("emergency"), Some(&TagValue::Text("yes".into())));
    }

    #[test]
    fn tags_from_iterator() {
        let tags: OsmTags = [("amenity", "police"), ("name", "PI Favoriten")]
            .into_iter()
            .collect();
        assert_eq!(tags.len(), 2);
        assert!(!tags.is_empty());
    }

    #[test]
    fn candidate_distance_is_set_by_with_distance() {
        let candidate = GeoCandidate::new(1, 48.2, 16.3, OsmTags::new());
        assert!(candidate.distance.is_none());
        let annotated = candidate.with_distance(250.0);
        assert_eq!(annotated.distance, Some(250.0));
    }


    #[test]
    fn location_copies_coordinates() {
        let candidate = GeoCandidate::new(7, 47.07, 15.44, OsmTags::new());
        let loc = candidate.location();
        assert!((loc.latitude() - 47.07).abs() < f64::EPSILON);
        assert!((loc.longitude() - 15.44).abs() < f64::EPSILON);
    }
}
