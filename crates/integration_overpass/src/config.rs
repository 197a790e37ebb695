//! Overpass client configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Overpass API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Interpreter endpoint of the Overpass API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds, also sent as the server-side query timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "I-need-help/1.0".to_string()
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Status endpoint derived from the interpreter URL
    #[must_use]
    pub fn status_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        base.strip_suffix("/interpreter")
            .map_or_else(|| format!("{base}/status"), |root| format!("{root}/status"))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}
