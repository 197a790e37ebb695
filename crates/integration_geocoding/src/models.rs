//! Reverse geocoding result model

use serde::{Deserialize, Serialize};

/// Structured address returned by a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
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
    pub house_number: Option<String>,
}

impl AddressRecord {
    /// One-line rendering of the known parts, for display
    #[must_use]
    pub fn summary(&self) -> String {
        let street_line = [self.street.as_deref(), self.house_number.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let city_line = [self.postcode.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        [street_line, city_line, self.country.clone().unwrap_or_default()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
