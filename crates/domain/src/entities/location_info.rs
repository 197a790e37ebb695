//! Resolved addresses and the location records returned to callers

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::geo_candidate::{
    GeoCandidate, OsmTags, TAG_CITY, TAG_COUNTRY, TAG_HOUSE_NAME, TAG_HOUSE_NUMBER, TAG_NAME,
    TAG_PHONE, TAG_POSTCODE, TAG_STREET, TAG_WEBSITE,
};

/// Name used when a facility has neither a name nor a building name
pub const UNNAMED: &str = "Unbenannt";

/// Normalized postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Country name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// City, district or town
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Street name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// House number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
}

impl ResolvedAddress {
    /// Build an address from inline `addr:*` tags
    ///
    /// Returns `None` unless `addr:street` is set to a non-empty value.
    /// Whitespace counts as a street. Missing sub-fields become empty strings.
    #[must_use]
    pub fn from_tags(tags: &OsmTags) -> Option<Self> {
        let street = tags.get_str(TAG_STREET).filter(|street| !street.is_empty())?;
        let field = |key: &str| Some(tags.get_str(key).unwrap_or_default());

        Some(Self {
            country: tags.get_str(TAG_COUNTRY),
            postcode: field(TAG_POSTCODE),
            city: field(TAG_CITY),
            street: Some(street),
            house: field(TAG_HOUSE_NUMBER),
        })
    }

    /// Address with every field blank, used when no source could resolve it
    #[must_use]
    pub fn blank() -> Self {
        Self {
            country: None,
            postcode: Some(String::new()),
            city: Some(String::new()),
            street: Some(String::new()),
            house: Some(String::new()),
        }
    }

    /// Whether no street, house, postcode or city is known
    #[must_use]
    pub fn is_blank(&self) -> bool {
        [&self.street, &self.house, &self.postcode, &self.city]
            .into_iter()
            .all(|field| field.as_deref().is_none_or(str::is_empty))
    }
}

/// Format an address line as `"{street} {house}, {postcode} {city}"`
///
/// Empty fields are kept in place, so missing parts leave their separators
/// behind (for example `" , 1010 Wien"`).
#[must_use]
pub fn format_address(street: &str, house: &str, postcode: &str, city: &str) -> String {
    format!("{street} {house}, {postcode} {city}")
}

/// A nearby emergency facility, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Identifier from the candidate
    pub id: i64,
    /// Display name, never empty
    pub name: String,
    /// Latitude in WGS84 degrees
    pub lat: f64,
    /// Longitude in WGS84 degrees
    pub lon: f64,
    /// Formatted single-line address
    pub address: String,
    /// Street name (empty if unknown)
    pub street: String,
    /// House number (empty if unknown)
    pub house: String,
    /// Postal code (empty if unknown)
    pub postcode: String,
    /// City (empty if unknown)
    pub city: String,
    /// Phone number from the tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website from the tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Meters from the search center
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl LocationInfo {
    /// Combine a candidate with its resolved address
    #[must_use]
    pub fn from_candidate(candidate: GeoCandidate, address: &ResolvedAddress) -> Self {
        let name = display_name(&candidate.tags);
        let street = address.street.clone().unwrap_or_default();
        let house = address.house.clone().unwrap_or_default();
        let postcode = address.postcode.clone().unwrap_or_default();
        let city = address.city.clone().unwrap_or_default();

        Self {
            id: candidate.id,
            name,
            lat: candidate.latitude,
            lon: candidate.longitude,
            address: format_address(&street, &house, &postcode, &city),
            street,
            house,
            postcode,
            city,
            phone: candidate.tags.get_str(TAG_PHONE),
            website: candidate.tags.get_str(TAG_WEBSITE),
            distance: candidate.distance,
        }
    }

    /// Maps link pointing at the facility's coordinates
    #[must_use]
    pub fn maps_link(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=17/{lat}/{lon}",
            lat = self.lat,
            lon = self.lon
        )
    }

    /// Distance rounded to whole meters, if known
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn distance_meters_rounded(&self) -> Option<u64> {
        self.distance.map(|d| d.max(0.0).round() as u64)
    }
}

/// Resolve the display name: `name` tag, then `addr:housename`, then [`UNNAMED`]
#[must_use]
pub fn display_name(tags: &OsmTags) -> String {
    tags.get_non_empty(TAG_NAME)
        .or_else(|| tags.get_non_empty(TAG_HOUSE_NAME))
        .unwrap_or_else(|| UNNAMED.to_string())
}

/// Order two optional distances ascending, unknown distances last
#[must_use]
pub fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by ascending distance, unknown distances last
pub fn sort_by_distance(locations: &mut [LocationInfo]) {
    locations.sort_by(|a, b| compare_distance(a.distance, b.distance));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_tags() -> OsmTags {
        OsmTags::new()
            .with("name", "Krankenhaus A")
            .with("addr:street", "Teststraße")
            .with("addr:housenumber", "5")
            .with("addr:postcode", "1010")
            .with("addr:city", "Wien")
            .with("phone", "+43 123 456")
            .with("website", "https://example.com")
    }

    fn info_with_distance(id: i64, distance: Option<f64>) -> LocationInfo {
        let mut candidate = GeoCandidate::new(id, 48.2, 16.3, OsmTags::new());
        candidate.distance = distance;
        LocationInfo::from_candidate(candidate, &ResolvedAddress::blank())
    }

    #[test]
    fn address_from_tags_requires_street() {
        let tags = OsmTags::new().with("addr:city", "Wien");
        assert!(ResolvedAddress::from_tags(&tags).is_none());
    }

    #[test]
    fn address_from_tags_fills_missing_with_empty() {
        let tags = OsmTags::new().with("addr:street", "Hauptstraße");
        let address = ResolvedAddress::from_tags(&tags).unwrap();
        assert_eq!(address.street.as_deref(), Some("Hauptstraße"));
        assert_eq!(address.house.as_deref(), Some(""));
        assert_eq!(address.postcode.as_deref(), Some(""));
        assert_eq!(address.city.as_deref(), Some(""));
        assert!(address.country.is_none());
    }

    #[test]
    fn blank_address_is_blank() {
        assert!(ResolvedAddress::blank().is_blank());
        assert!(ResolvedAddress::default().is_blank());
        assert!(!ResolvedAddress::from_tags(&full_tags()).unwrap().is_blank());
    }

    #[test]
    fn location_info_from_tagged_candidate() {
        let candidate = GeoCandidate::new(1, 48.2, 16.3, full_tags()).with_distance(120.0);
        let address = ResolvedAddress::from_tags(&candidate.tags).unwrap();
        let info = LocationInfo::from_candidate(candidate, &address);

        assert_eq!(info.id, 1);
        assert_eq!(info.name, "Krankenhaus A");
        assert_eq!(info.address, "Teststraße 5, 1010 Wien");
        assert_eq!(info.street, "Teststraße");
        assert_eq!(info.house, "5");
        assert_eq!(info.postcode, "1010");
        assert_eq!(info.city, "Wien");
        assert_eq!(info.phone.as_deref(), Some("+43 123 456"));
        assert_eq!(info.website.as_deref(), Some("https://example.com"));
        assert_eq!(info.distance, Some(120.0));
    }

    #[test]
    fn blank_address_keeps_separators() {
        let info = info_with_distance(3, None);
        assert_eq!(info.address, " ,  ");
        assert_eq!(info.street, "");
        assert_eq!(info.city, "");
    }

    #[test]
    fn whitespace_street_counts_as_inline() {
        let tags = OsmTags::new().with("addr:street", " ");
        let address = ResolvedAddress::from_tags(&tags).unwrap();
        assert_eq!(address.street.as_deref(), Some(" "));
        assert_eq!(address.city.as_deref(), Some(""));

        let empty = OsmTags::new().with("addr:street", "");
        assert!(ResolvedAddress::from_tags(&empty).is_none());
    }

    #[test]
    fn partial_address_keeps_separators() {
        assert_eq!(format_address("", "", "1010", "Wien"), " , 1010 Wien");
        assert_eq!(format_address("Ring", "", "", ""), "Ring ,  ");
    }

    #[test]
    fn name_falls_back_to_housename() {
        let tags = OsmTags::new().with("addr:housename", "Station Z");
        assert_eq!(display_name(&tags), "Station Z");
    }

    #[test]
    fn name_falls_back_to_unnamed() {
        assert_eq!(display_name(&OsmTags::new()), "Unbenannt");
        let blank = OsmTags::new().with("name", "");
        assert_eq!(display_name(&blank), UNNAMED);
    }

    #[test]
    fn phone_and_website_absent_when_untagged() {
        let info = info_with_distance(4, Some(10.0));
        assert!(info.phone.is_none());
        assert!(info.website.is_none());
    }

    #[test]
    fn sort_puts_unknown_distance_last() {
        let mut list = vec![
            info_with_distance(1, None),
            info_with_distance(2, Some(300.0)),
            info_with_distance(3, Some(100.0)),
        ];
        sort_by_distance(&mut list);
        let distances: Vec<_> = list.iter().map(|l| l.distance).collect();
        assert_eq!(distances, vec![Some(100.0), Some(300.0), None]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut list = vec![
            info_with_distance(1, None),
            info_with_distance(2, Some(50.0)),
            info_with_distance(3, None),
            info_with_distance(4, Some(50.0)),
        ];
        sort_by_distance(&mut list);
        let ids: Vec<_> = list.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn maps_link_contains_coordinates() {
        let info = info_with_distance(5, None);
        let link = info.maps_link();
        assert!(link.contains("mlat=48.2"));
        assert!(link.contains("mlon=16.3"));
    }

    #[test]
    fn rounded_distance() {
        assert_eq!(info_with_distance(1, Some(99.6)).distance_meters_rounded(), Some(100));
        assert_eq!(info_with_distance(1, None).distance_meters_rounded(), None);
    }

    #[test]
    fn serialization_skips_missing_optionals() {
        let json = serde_json::to_value(info_with_distance(9, None)).unwrap();
        assert!(json.get("phone").is_none());
        assert!(json.get("distance").is_none());
        assert_eq!(json["name"], "Unbenannt");
    }
}
