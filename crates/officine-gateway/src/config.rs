//! # Gateway Configuration
//!
//! Base URL and transport timeout, resolved from explicit values or
//! the environment.
//!
//! ## Precedence
//! explicit argument → environment variable → built-in default

use std::time::Duration;

/// Environment variable naming the backend host.
pub const API_URL_ENV: &str = "OFFICINE_API_URL";

/// Environment variable overriding the HTTP timeout, in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "OFFICINE_HTTP_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the remote gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend host, without a trailing slash
    /// (e.g. `https://backoffice.example.com/pharma`).
    pub base_url: String,
    /// Transport-level timeout for every request.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a config from an explicit base URL or the environment.
    pub fn from_env_or(base_url: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var(HTTP_TIMEOUT_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        GatewayConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// The read-path endpoint.
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    /// A write-path endpoint, e.g. `rest_url("produits")`.
    pub fn rest_url(&self, resource: &str) -> String {
        format!("{}/api/{}", self.base_url, resource)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig::from_env_or(None)
    }
}
