//! Overpass HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OverpassError;
use crate::models::OverpassResponse;
use crate::query::OverpassQuery;

/// Trait for Overpass API clients
#[async_trait]
pub trait OverpassClient: Send + Sync {
    /// Run a node query and return the parsed elements
    async fn query_nodes(&self, query: &OverpassQuery) -> Result<OverpassResponse, OverpassError>;

    /// Check if the Overpass server is reachable
    async fn is_healthy(&self) -> bool;
}

/// Overpass client posting form-encoded queries over HTTP
#[derive(Debug)]
pub struct HttpOverpassClient {
    client: Client,
    config: OverpassConfig,
}

impl HttpOverpassClient {
    /// Create a new Overpass client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OverpassConfig) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| OverpassError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }

    fn map_send_error(&self, e: &reqwest::Error) -> OverpassError {
        if e.is_timeout() {
            OverpassError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            OverpassError::ConnectionFailed(e.to_string())
        }
    }
}

/// Map a non-success status to an error
fn status_error(status: StatusCode, retry_after: Option<u64>) -> OverpassError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => OverpassError::RateLimitExceeded {
            retry_after_secs: retry_after,
        },
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            OverpassError::ServiceUnavailable(format!("HTTP {status}"))
        },
        _ => OverpassError::RequestFailed(format!("HTTP {status}")),
    }
}

#[async_trait]
impl OverpassClient for HttpOverpassClient {
    #[instrument(skip(self, query), fields(radius_m = query.radius_m(), filters = query.filters().len()))]
    async fn query_nodes(&self, query: &OverpassQuery) -> Result<OverpassResponse, OverpassError> {
        let body = query.clone().with_timeout(self.config.timeout_secs).build()?;

        debug!(url = %self.config.base_url, %body, "Posting Overpass query");

        let response = self
            .client
            .post(&self.config.base_url)
            .form(&[("data", body.as_str())])
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
            return Err(status_error(status, retry_after));
        }

        let text = response
            .text()
            .await
            .map_err(|e| OverpassError::ParseError(e.to_string()))?;

        let parsed = OverpassResponse::parse(&text)?;

        if let Some(remark) = &parsed.remark {
            warn!(%remark, "Overpass reported a runtime remark");
        }

        debug!(count = parsed.elements.len(), "Overpass elements received");
        Ok(parsed)
    }

    async fn is_healthy(&self) -> bool {
        match self.client.get(self.config.status_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Overpass health check failed");
                false
            },
        }
    }
}
