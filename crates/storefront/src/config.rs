//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HEMLINE_WHATSAPP_NUMBER` - Number the messaging deep link opens a chat with
//! - `HEMLINE_CHECKOUT_REDIRECT_SECS` - Delay before returning home after checkout (default: 3)
//! - `HEMLINE_CATALOG_CACHE_SECS` - Catalog cache time-to-live (default: 300)
//!
//! Plus everything read by [`ApiConfig::from_env`].

use std::time::Duration;

use hemline_client::config::{ApiConfig, ConfigError, get_optional_env, parse_env_or_default};
use hemline_core::Phone;

const DEFAULT_REDIRECT_SECS: u64 = 3;
const DEFAULT_CACHE_SECS: u64 = 300;

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend connection settings
    pub api: ApiConfig,
    /// Messaging number for the order deep link
    pub whatsapp_number: Option<Phone>,
    /// How long the checkout confirmation stays up
    pub checkout_redirect: Duration,
    /// Time-to-live for cached catalog reads
    pub catalog_cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api = ApiConfig::from_env()?;

        let whatsapp_number = get_optional_env("HEMLINE_WHATSAPP_NUMBER")
            .map(|raw| {
                Phone::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("HEMLINE_WHATSAPP_NUMBER".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let redirect_secs: u64 =
            parse_env_or_default("HEMLINE_CHECKOUT_REDIRECT_SECS", DEFAULT_REDIRECT_SECS)?;
        let cache_secs: u64 = parse_env_or_default("HEMLINE_CATALOG_CACHE_SECS", DEFAULT_CACHE_SECS)?;

        Ok(Self {
            api,
            whatsapp_number,
            checkout_redirect: Duration::from_secs(redirect_secs),
            catalog_cache_ttl: Duration::from_secs(cache_secs),
        })
    }

    /// Defaults around an explicit API configuration.
    #[must_use]
    pub fn with_api(api: ApiConfig) -> Self {
        Self {
            api,
            whatsapp_number: None,
            checkout_redirect: Duration::from_secs(DEFAULT_REDIRECT_SECS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CACHE_SECS),
        }
    }
}
