//! Auth session and navigation hooks.
//!
//! The bearer token and user record live in durable storage so a session
//! survives restarts. The [`Navigator`] trait is how the API client moves the
//! user to the login route when the backend rejects the token.

use std::sync::{Arc, Mutex, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::storage::{Storage, StorageError, keys};

/// Route the user is sent to when the session is rejected.
pub const LOGIN_ROUTE: &str = "/login";

/// Route shown after checkout completes.
pub const HOME_ROUTE: &str = "/";

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionUser {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Handle to the persisted auth token and user record.
#[derive(Clone)]
pub struct AuthSession {
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The stored bearer token, if any.
    ///
    /// Read failures are logged and treated as "no token": an unreadable
    /// token must not block public endpoints.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match self.storage.get(keys::AUTH_TOKEN) {
            Ok(Some(token)) if !token.trim().is_empty() => Some(SecretString::from(token)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read auth token");
                None
            }
        }
    }

    /// The stored user record, if present and readable.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        let raw = self.storage.get(keys::AUTH_USER).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored user");
                None
            }
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued token and its user.
    ///
    /// # Errors
    ///
    /// Returns an error if either value cannot be written.
    pub fn store(&self, token: &SecretString, user: Option<&SessionUser>) -> Result<(), StorageError> {
        self.storage.set(keys::AUTH_TOKEN, token.expose_secret())?;
        match user.map(serde_json::to_string) {
            Some(Ok(json)) => self.storage.set(keys::AUTH_USER, &json),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Failed to serialize session user");
                self.storage.remove(keys::AUTH_USER)
            }
            None => self.storage.remove(keys::AUTH_USER),
        }
    }

    /// Forget the token and user record.
    ///
    /// Removal failures are logged; a half-cleared session still has no
    /// usable token once the token key is gone.
    pub fn clear(&self) {
        for key in [keys::AUTH_TOKEN, keys::AUTH_USER] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(error = %e, key, "Failed to clear session entry");
            }
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Minimal view of the front-end router needed by the client layer.
pub trait Navigator: Send + Sync {
    /// The route currently shown.
    fn current_route(&self) -> String;

    /// Move to `route`.
    fn redirect(&self, route: &str);
}

/// In-process navigator that records where it has been sent.
#[derive(Debug)]
pub struct RouteState {
    inner: Mutex<RouteInner>,
}

#[derive(Debug)]
struct RouteInner {
    current: String,
    redirects: Vec<String>,
}

impl RouteState {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            inner: Mutex::new(RouteInner {
                current: initial.to_string(),
                redirects: Vec::new(),
            }),
        }
    }

    /// Routes this navigator has been redirected to, oldest first.
    #[must_use]
    pub fn redirects(&self) -> Vec<String> {
        self.lock().redirects.clone()
    }

    /// Record a user-initiated navigation (not counted as a redirect).
    pub fn visit(&self, route: &str) {
        self.lock().current = route.to_string();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouteInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RouteState {
    fn default() -> Self {
        Self::new(HOME_ROUTE)
    }
}

impl Navigator for RouteState {
    fn current_route(&self) -> String {
        self.lock().current.clone()
    }

    fn redirect(&self, route: &str) {
        tracing::info!(route, "Redirecting");
        let mut inner = self.lock();
        inner.current = route.to_string();
        inner.redirects.push(route.to_string());
    }
}
