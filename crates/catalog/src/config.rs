//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_BASE_URL` - Base URL of the catalog service (default: `http://localhost:3000`)
//! - `CATALOG_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service; `/products` is appended to it
    pub base_url: Url,
    /// Timeout applied to each request
    pub timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CatalogConfig {
    /// Create a configuration for `base_url` with the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sentry_dsn: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "CATALOG_BASE_URL",
            &get_env_or_default("CATALOG_BASE_URL", DEFAULT_BASE_URL),
        )?;
        let timeout = parse_timeout(
            "CATALOG_TIMEOUT_SECS",
            &get_env_or_default("CATALOG_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string()),
        )?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            base_url,
            timeout,
            sentry_dsn,
        })
    }

    /// Replace the base URL, validating it the same way as the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `raw` is not an http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url("--base-url", raw)?;
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate a catalog base URL.
fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

/// Parse a positive number of seconds.
fn parse_timeout(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn local_config() -> CatalogConfig {
        CatalogConfig::new(parse_base_url("X", DEFAULT_BASE_URL).unwrap())
    }

    #[test]
    fn test_new_uses_default_timeout() {
        let config = local_config();
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_parse_base_url_accepts_https_with_path() {
        let url = parse_base_url("X", "https://api.example.com/v1").unwrap();
        assert_eq!(url.path(), "/v1");
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("X", "ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("X", "not a url").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("X", "3").unwrap(), Duration::from_secs(3));
        assert!(parse_timeout("X", "0").is_err());
        assert!(parse_timeout("X", "soon").is_err());
    }

    #[test]
    fn test_with_base_url_override() {
        let config = local_config()
            .with_base_url("http://127.0.0.1:8080")
            .unwrap();
        assert_eq!(config.base_url.port(), Some(8080));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), "bad".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable CATALOG_TIMEOUT_SECS: bad"
        );
    }
}
