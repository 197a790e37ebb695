//! Nominatim reverse geocoding client
//!
//! Resolves coordinates to postal addresses via the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Enforces the usage policy (at most one request per second, identifying
//! User-Agent) and caches resolved addresses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::cache::AddressCache;
use crate::{AddressRecord, GeocodingConfig, GeocodingError, ReverseGeocodingProvider};

/// Nominatim-based reverse geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: GeocodingConfig,
    cache: AddressCache,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            cache: AddressCache::new(config.cache_ttl_secs, config.cache_capacity),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce the minimum interval between requests
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting Nominatim request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn map_send_error(&self, e: &reqwest::Error) -> GeocodingError {
        if e.is_timeout() {
            GeocodingError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            GeocodingError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl ReverseGeocodingProvider for NominatimClient {
    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<AddressRecord>, GeocodingError> {
        if let Some(record) = self.cache.get(latitude, longitude).await {
            debug!("Reverse geocoding cache hit");
            return Ok(Some(record));
        }

        self.rate_limit().await;

        let url = format!("{}/reverse", self.config.nominatim_base_url);
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "json".to_string()),
        ];

        debug!(%url, "Reverse geocoding via Nominatim");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(GeocodingError::from_status(status, retry_after));
        }

        let body: NominatimReverse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let Some(address) = body.address else {
            debug!(error = ?body.error, "Nominatim returned no address");
            return Ok(None);
        };

        let record = address.into_record();
        self.cache.insert(latitude, longitude, record.clone()).await;
        Ok(Some(record))
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/status", self.config.nominatim_base_url);
        match self.client.get(&url).query(&[("format", "json")]).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Nominatim health check failed");
                false
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "nominatim"
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    address: Option<NominatimAddress>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    country: Option<String>,
    city: Option<String>,
    city_district: Option<String>,
    town: Option<String>,
    postcode: Option<String>,
    road: Option<String>,
    house_number: Option<String>,
}

impl NominatimAddress {
    fn into_record(self) -> AddressRecord {
        let non_empty = |value: &Option<String>| value.as_ref().is_some_and(|v| !v.is_empty());
        let city = [self.city, self.city_district, self.town]
            .into_iter()
            .find(|candidate| non_empty(candidate))
            .flatten();

        AddressRecord {
            country: self.country,
            postcode: self.postcode,
            city,
            street: self.road,
            house_number: self.house_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> NominatimReverse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_address_mapping() {
        let body = parse(
            r#"{"display_name": "x", "address": {
                "road": "Stephansplatz", "house_number": "3", "postcode": "1010",
                "city": "Wien", "country": "Österreich", "country_code": "at"
            }}"#,
        );
        let record = body.address.unwrap().into_record();
        assert_eq!(record.street.as_deref(), Some("Stephansplatz"));
        assert_eq!(record.house_number.as_deref(), Some("3"));
        assert_eq!(record.postcode.as_deref(), Some("1010"));
        assert_eq!(record.city.as_deref(), Some("Wien"));
        assert_eq!(record.country.as_deref(), Some("Österreich"));
    }

    #[test]
    fn test_city_falls_back_to_district_then_town() {
        let body = parse(r#"{"address": {"city_district": "Innere Stadt", "town": "X"}}"#);
        assert_eq!(
            body.address.unwrap().into_record().city.as_deref(),
            Some("Innere Stadt")
        );

        let body = parse(r#"{"address": {"city": "", "town": "Mödling"}}"#);
        assert_eq!(
            body.address.unwrap().into_record().city.as_deref(),
            Some("Mödling")
        );

        let body = parse(r#"{"address": {"road": "Feldweg"}}"#);
        assert!(body.address.unwrap().into_record().city.is_none());
    }

    #[test]
    fn test_error_body_has_no_address() {
        let body = parse(r#"{"error": "Unable to geocode"}"#);
        assert!(body.address.is_none());
        assert_eq!(body.error.as_deref(), Some("Unable to geocode"));
    }

    #[test]
    fn test_client_creation() {
        let client = NominatimClient::new(&GeocodingConfig::for_testing()).unwrap();
        assert_eq!(client.provider_name(), "nominatim");
    }
}
