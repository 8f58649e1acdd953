//! Hemline client library.
//!
//! Everything that talks to the outside world on behalf of the storefront and
//! the admin console lives here:
//!
//! - [`config`] - API configuration loaded from the environment
//! - [`storage`] - Durable key-value storage (cart, theme, auth token)
//! - [`session`] - Auth session and navigation hooks used on 401
//! - [`api`] - REST client with response envelope normalization
//! - [`fetch`] - Cancellation scopes and loading state for screens
//! - [`notify`] - Transient user notifications

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod fetch;
pub mod notify;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use config::{ApiConfig, ConfigError};
pub use fetch::{FetchScope, Loadable};
pub use notify::{Notice, NoticeLevel, Notifications};
pub use session::{AuthSession, HOME_ROUTE, LOGIN_ROUTE, Navigator, RouteState, SessionUser};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
