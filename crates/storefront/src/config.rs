//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `HAZELMARKET_API_BASE_URL` - Base URL of the marketplace backend
//!
//! ## Optional
//! - `HAZELMARKET_API_TOKEN` - Bearer token for the backend session
//! - `HAZELMARKET_HTTP_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `HAZELMARKET_CATALOG_TTL_SECS` - Catalog cache TTL (default: 300)
//! - `HAZELMARKET_LOCALE` - Display locale (default: en-US)
//! - `HAZELMARKET_CURRENCY` - ISO currency code for display (default: USD)

use std::time::Duration;

use hazelmarket_core::{CurrencyCode, Price};
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CATALOG_TTL_SECS: u64 = 300;
const DEFAULT_LOCALE: &str = "en-US";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Marketplace backend API configuration.
///
/// Implements `Debug` manually to redact the session token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., <https://api.hazelmarket.example>)
    pub base_url: Url,
    /// Optional bearer token for the backend session
    pub token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long a loaded catalog stays fresh
    pub catalog_ttl: Duration,
    /// Display locale and currency
    pub display: DisplayConfig,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("catalog_ttl", &self.catalog_ttl)
            .field("display", &self.display)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url_raw = get_required_env("HAZELMARKET_API_BASE_URL")?;
        let base_url = Url::parse(&base_url_raw).map_err(|e| {
            ConfigError::InvalidEnvVar("HAZELMARKET_API_BASE_URL".to_string(), e.to_string())
        })?;

        let token = get_optional_env("HAZELMARKET_API_TOKEN").map(SecretString::from);
        let timeout = get_duration_secs("HAZELMARKET_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let catalog_ttl =
            get_duration_secs("HAZELMARKET_CATALOG_TTL_SECS", DEFAULT_CATALOG_TTL_SECS)?;
        let display = DisplayConfig::from_env()?;

        Ok(Self {
            base_url,
            token,
            timeout,
            catalog_ttl,
            display,
        })
    }
}

/// Display locale and currency for price formatting.
///
/// Formatting is a presentation concern: the pricing engine's contract is
/// the decimal amounts, and this only controls how they render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// BCP 47 display locale (e.g., en-US)
    pub locale: String,
    /// ISO 4217 currency code
    pub currency: CurrencyCode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl DisplayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let locale = get_env_or_default("HAZELMARKET_LOCALE", DEFAULT_LOCALE);
        let currency = get_env_or_default("HAZELMARKET_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("HAZELMARKET_CURRENCY".to_string(), e.to_string())
            })?;
        Ok(Self { locale, currency })
    }

    /// Format a monetary amount for display (e.g., "$25.59").
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency).display()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a duration in whole seconds from an environment variable.
fn get_duration_secs(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
