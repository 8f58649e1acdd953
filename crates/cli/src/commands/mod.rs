//! Command implementations.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;
pub mod theme;

use std::sync::Arc;

use hemline_admin::{AdminConfig, AdminError};
use hemline_client::config::ConfigError;
use hemline_client::{ApiClient, ApiError, AuthSession, FileStorage, RouteState, Storage, StorageError};
use hemline_storefront::{CartStore, Catalog, CheckoutError, DeepLinkError, StorefrontConfig};
use thiserror::Error;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    DeepLink(#[from] DeepLinkError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid request that was caught before reaching the backend.
    #[error("{0}")]
    Usage(String),
}

/// Everything a command needs, built once from the environment.
pub struct Context {
    pub api: ApiClient,
    pub storage: Arc<dyn Storage>,
    pub routes: Arc<RouteState>,
    pub storefront: StorefrontConfig,
    pub admin: AdminConfig,
}

impl Context {
    /// Load configuration and open durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the data directory
    /// cannot be created, or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, CliError> {
        let storefront = StorefrontConfig::from_env()?;
        let admin = AdminConfig::from_env()?;

        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&storefront.api.data_dir)?);
        let routes = Arc::new(RouteState::default());
        let api = ApiClient::new(
            &storefront.api,
            AuthSession::new(Arc::clone(&storage)),
            Arc::clone(&routes) as Arc<dyn hemline_client::Navigator>,
        )?;

        tracing::debug!(
            api = %storefront.api.base_url,
            data_dir = %storefront.api.data_dir.display(),
            policy = %admin.transition_policy,
            "Context ready"
        );

        Ok(Self {
            api,
            storage,
            routes,
            storefront,
            admin,
        })
    }

    #[must_use]
    pub fn cart(&self) -> CartStore {
        CartStore::load(Arc::clone(&self.storage))
    }

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.api.clone(), self.storefront.catalog_cache_ttl)
    }
}
