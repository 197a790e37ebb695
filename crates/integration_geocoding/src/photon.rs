//! Photon reverse geocoding client
//!
//! Client for the [Photon](https://photon.komoot.io) API, a GeoJSON
//! geocoder built on OpenStreetMap data.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::cache::AddressCache;
use crate::{AddressRecord, GeocodingConfig, GeocodingError, ReverseGeocodingProvider};

/// Photon-based reverse geocoding client
#[derive(Debug)]
pub struct PhotonClient {
    client: Client,
    config: GeocodingConfig,
    cache: AddressCache,
}

impl PhotonClient {
    /// Create a new Photon client
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
        })
    }

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<reqwest::Response, GeocodingError> {
        let url = format!("{}/reverse", self.config.photon_base_url);
        let params = [("lat", latitude.to_string()), ("lon", longitude.to_string())];

        debug!(%url, "Reverse geocoding via Photon");

        self.client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })
    }
}

#[async_trait]
impl ReverseGeocodingProvider for PhotonClient {
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

        let response = self.fetch(latitude, longitude).await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(GeocodingError::from_status(status, retry_after));
        }

        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let Some(feature) = collection.features.into_iter().next() else {
            debug!("Photon returned no features");
            return Ok(None);
        };

        let record = feature.properties.into_record();
        self.cache.insert(latitude, longitude, record.clone()).await;
        Ok(Some(record))
    }

    async fn is_healthy(&self) -> bool {
        match self.fetch(0.0, 0.0).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Photon health check failed");
                false
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "photon"
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    country: Option<String>,
    postcode: Option<String>,
    city: Option<String>,
    street: Option<String>,
    housenumber: Option<String>,
}

impl FeatureProperties {
    fn into_record(self) -> AddressRecord {
        AddressRecord {
            country: self.country,
            postcode: self.postcode,
            city: self.city,
            street: self.street,
            house_number: self.housenumber,
        }
    }
}
