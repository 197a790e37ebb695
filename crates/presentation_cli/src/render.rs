//! Human readable output

use std::fmt::Write;

use application::services::BackendStatus;
use domain::{Department, LocationInfo, ResolvedAddress, format_address};

/// Heading printed above search results
pub fn results_heading(department: Department, count: usize, latitude: f64, longitude: f64) -> String {
    format!(
        "{} {}: {count} found near {latitude:.6}, {longitude:.6}",
        department.emoji(),
        department.label()
    )
}

/// One numbered search result with its details
pub fn location_entry(position: usize, location: &LocationInfo) -> String {
    let mut out = match location.distance_meters_rounded() {
        Some(meters) => format!("{position}. {} ({meters} m)", location.name),
        None => format!("{position}. {}", location.name),
    };

    let _ = write!(out, "\n   📍 {}", location.address);
    if let Some(phone) = &location.phone {
        let _ = write!(out, "\n   📞 {phone}");
    }
    if let Some(website) = &location.website {
        let _ = write!(out, "\n   🌐 {website}");
    }
    let _ = write!(out, "\n   🗺️  {}", location.maps_link());
    out
}

/// Single line rendering of a reverse geocoding answer
pub fn address_line(address: &ResolvedAddress) -> String {
    let line = format_address(
        address.street.as_deref().unwrap_or_default(),
        address.house.as_deref().unwrap_or_default(),
        address.postcode.as_deref().unwrap_or_default(),
        address.city.as_deref().unwrap_or_default(),
    );
    match &address.country {
        Some(country) if !country.is_empty() => format!("{line}, {country}"),
        _ => line,
    }
}

/// Health probe summary, one line per backend
pub fn backend_status(status: &BackendStatus) -> String {
    let mark = |ok: bool| if ok { "✅" } else { "❌" };
    format!(
        "{} Overpass\n{} Reverse geocoder ({})",
        mark(status.spatial),
        mark(status.geocoder),
        status.geocoder_provider
    )
}

#[cfg(test)]
mod tests {
    use domain::{GeoCandidate, OsmTags};

    use super::*;

    fn location(distance: Option<f64>, phone: Option<&str>) -> LocationInfo {
        let mut tags = OsmTags::new().with("name", "Hauptwache");
        if let Some(phone) = phone {
            tags.insert("phone", phone);
        }
        let mut candidate = GeoCandidate::new(7, 48.2, 16.3, tags);
        candidate.distance = distance;
        let address = ResolvedAddress {
            street: Some("Am Hof".to_string()),
            house: Some("9".to_string()),
            postcode: Some("1010".to_string()),
            city: Some("Wien".to_string()),
            country: None,
        };
        LocationInfo::from_candidate(candidate, &address)
    }

    #[test]
    fn heading_names_department() {
        let heading = results_heading(Department::Fire, 3, 48.2, 16.3);
        assert_eq!(heading, "🚒 Fire: 3 found near 48.200000, 16.300000");
    }

    #[test]
    fn entry_with_distance_and_phone() {
        let entry = location_entry(1, &location(Some(1234.4), Some("122")));
        let lines: Vec<&str> = entry.lines().collect();
        assert_eq!(lines[0], "1. Hauptwache (1234 m)");
        assert_eq!(lines[1], "   📍 Am Hof 9, 1010 Wien");
        assert_eq!(lines[2], "   📞 122");
        assert!(lines[3].contains("openstreetmap.org"));
    }

    #[test]
    fn entry_without_distance() {
        let entry = location_entry(2, &location(None, None));
        assert!(entry.starts_with("2. Hauptwache\n"));
        assert!(!entry.contains("📞"));
    }

    #[test]
    fn address_line_appends_country() {
        let mut address = ResolvedAddress {
            street: Some("Ring".to_string()),
            house: Some("1".to_string()),
            postcode: Some("8010".to_string()),
            city: Some("Graz".to_string()),
            country: None,
        };
        assert_eq!(address_line(&address), "Ring 1, 8010 Graz");

        address.country = Some("Österreich".to_string());
        assert_eq!(address_line(&address), "Ring 1, 8010 Graz, Österreich");
    }

    #[test]
    fn backend_status_marks_each_backend() {
        let status = BackendStatus {
            spatial: true,
            geocoder: false,
            geocoder_provider: "photon",
        };
        assert_eq!(
            backend_status(&status),
            "✅ Overpass\n❌ Reverse geocoder (photon)"
        );
    }
}
