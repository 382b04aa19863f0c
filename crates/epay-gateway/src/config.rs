//! # Gateway Configuration
//!
//! Configuration management for the ePay gateway integration.
//! Credentials are loaded from environment variables; nothing is embedded
//! in the binary. TLS certificate verification is on by default and can
//! only be disabled through an explicit opt-in knob.

use epay_core::ApiError;
use std::env;
use std::time::Duration;

/// Default gateway base URL (demo environment)
pub const DEFAULT_BASE_URL: &str = "https://api.epaypolicydemo.com:443/api/v1";

/// Default timeout for all outbound gateway calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// ePay API configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API key (basic-auth username)
    pub api_key: String,

    /// API secret (basic-auth password)
    pub api_secret: String,

    /// API base URL, including the `/api/v1` prefix
    pub base_url: String,

    /// Timeout applied to every outbound call
    pub timeout: Duration,

    /// Skip TLS certificate verification. Defaults to false; only enable
    /// against the demo environment.
    pub accept_invalid_certs: bool,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `EPAY_API_KEY`
    /// - `EPAY_API_SECRET`
    ///
    /// Optional:
    /// - `EPAY_BASE_URL` (defaults to the demo environment)
    /// - `EPAY_ACCEPT_INVALID_CERTS` (defaults to `false`)
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("EPAY_API_KEY")
            .map_err(|_| ApiError::Configuration("EPAY_API_KEY not set".to_string()))?;

        let api_secret = env::var("EPAY_API_SECRET")
            .map_err(|_| ApiError::Configuration("EPAY_API_SECRET not set".to_string()))?;

        let base_url = env::var("EPAY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let accept_invalid_certs = env::var("EPAY_ACCEPT_INVALID_CERTS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            api_key,
            api_secret,
            base_url,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs,
        })
    }

    /// Create config with explicit credentials (for testing)
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Builder: set custom base URL (for testing against a mock gateway)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder: set call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: opt in to skipping TLS verification
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_secure() {
        let config = GatewayConfig::new("key", "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_builders() {
        let config = GatewayConfig::new("key", "secret")
            .with_base_url("http://127.0.0.1:9999/api/v1")
            .with_timeout(Duration::from_secs(2))
            .with_accept_invalid_certs(true);

        assert_eq!(config.base_url, "http://127.0.0.1:9999/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var("EPAY_API_KEY");

        let result = GatewayConfig::from_env();
        assert!(result.is_err());
    }
}
