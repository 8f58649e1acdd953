//! REST client for the Hemline backend.
//!
//! # Architecture
//!
//! - One `reqwest::Client` shared by every clone of [`ApiClient`]
//! - Bearer token read from durable storage on every request (absent is fine,
//!   some endpoints are public)
//! - A 401 clears the stored session and sends the navigator to the login
//!   route, unless it is already there
//! - Every other non-2xx status is returned to the caller as
//!   [`ApiError::Status`]
//! - Response bodies are normalized by [`envelope`] so callers never see the
//!   backend's varying wrapper shapes
//!
//! # Example
//!
//! ```rust,ignore
//! use hemline_client::{ApiClient, FetchScope};
//!
//! let api = ApiClient::new(&config, session, navigator)?;
//!
//! // Bind requests to a screen's lifetime
//! let scope = FetchScope::new();
//! let products = scope.client(&api).list_products().await?;
//! ```

mod auth;
mod categories;
pub mod envelope;
mod orders;
mod products;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::session::{AuthSession, LOGIN_ROUTE, Navigator};
use crate::storage::StorageError;

/// Longest slice of a response body copied into logs and error messages.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status other than 401.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Backend rejected the session; it has been cleared.
    #[error("Unauthorized: session expired")]
    Unauthorized,

    /// The owning scope was dropped or cancelled before the response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// A single-entity response had no recognizable payload.
    #[error("Response did not contain a {0}")]
    MissingEntity(&'static str),

    /// Persisting session data failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status of the failure, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Whether offering the user a retry makes sense.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::MissingEntity(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            Self::Unauthorized | Self::Cancelled | Self::Storage(_) => false,
        }
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the Hemline REST API.
///
/// Cheap to clone. A clone made with [`ApiClient::with_cancellation`] aborts
/// its in-flight requests when the token is cancelled.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
    cancel: Option<CancellationToken>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    session: AuthSession,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        config: &ApiConfig,
        session: AuthSession,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                session,
                navigator,
            }),
            cancel: None,
        })
    }

    /// A clone whose requests resolve to [`ApiError::Cancelled`] once `token`
    /// is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    /// The auth session used for bearer tokens.
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.inner.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the bearer token attached when present.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.inner.http.request(method, self.endpoint(path));
        match self.inner.session.token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and return the parsed body.
    ///
    /// A successful response with an empty or non-JSON body yields
    /// `Value::Null` so envelope extraction degrades instead of failing.
    async fn send(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let exchange = self.exchange(builder);
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    tracing::debug!("Request cancelled by owning scope");
                    Err(ApiError::Cancelled)
                }
                result = exchange => result,
            },
            None => exchange.await,
        }
    }

    async fn exchange(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::error!(
                status = %status,
                message = %message,
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    body = %excerpt(&body),
                    "Successful response was not JSON, treating as empty"
                );
                Ok(Value::Null)
            }
        }
    }

    /// Clear the session and leave for the login route (once).
    fn handle_unauthorized(&self) {
        tracing::warn!("API rejected credentials, clearing session");
        self.inner.session.clear();

        let navigator = &self.inner.navigator;
        if navigator.current_route() == LOGIN_ROUTE {
            tracing::debug!("Already on login route, not redirecting");
        } else {
            navigator.redirect(LOGIN_ROUTE);
        }
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// Best human-readable message from an error body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    let trimmed = excerpt(body.trim());
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::session::{HOME_ROUTE, RouteState};
    use crate::storage::{MemoryStorage, Storage, keys};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) struct Harness {
        pub server: MockServer,
        pub storage: Arc<MemoryStorage>,
        pub routes: Arc<RouteState>,
        pub api: ApiClient,
    }

    pub(crate) async fn harness(route: &str) -> Harness {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let routes = Arc::new(RouteState::new(route));
        let config = ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap();
        let api = ApiClient::new(&config, AuthSession::new(storage.clone()), routes.clone()).unwrap();
        Harness {
            server,
            storage,
            routes,
            api,
        }
    }

    #[test]
    fn test_error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"Out of stock"}"#), "Out of stock");
        assert_eq!(error_message(r#"{"error":"Bad id"}"#), "Bad id");
        assert_eq!(error_message("Gateway Timeout"), "Gateway Timeout");
        assert_eq!(error_message(""), "no response body");
    }

    #[test]
    fn test_retryable_statuses() {
        let server_error = ApiError::Status {
            status: 503,
            message: String::new(),
        };
        let not_found = ApiError::Status {
            status: 404,
            message: String::new(),
        };
        assert!(server_error.is_retryable());
        assert!(!not_found.is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let h = harness(HOME_ROUTE).await;
        h.storage.set(keys::AUTH_TOKEN, "tok-1").unwrap();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&h.server)
            .await;

        let orders = h.api.list_orders().await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_redirects() {
        let h = harness("/admin/orders").await;
        h.storage.set(keys::AUTH_TOKEN, "expired").unwrap();
        h.storage.set(keys::AUTH_USER, r#"{"name":"A"}"#).unwrap();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&h.server)
            .await;

        let err = h.api.list_orders().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(h.storage.get(keys::AUTH_TOKEN).unwrap().is_none());
        assert!(h.storage.get(keys::AUTH_USER).unwrap().is_none());
        assert_eq!(h.routes.redirects(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[tokio::test]
    async fn test_unauthorized_on_login_route_does_not_redirect() {
        let h = harness(LOGIN_ROUTE).await;
        h.storage.set(keys::AUTH_TOKEN, "expired").unwrap();

        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&h.server)
            .await;

        let err = h.api.list_orders().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(h.storage.get(keys::AUTH_TOKEN).unwrap().is_none());
        assert!(h.routes.redirects().is_empty());
        assert_eq!(h.routes.current_route(), LOGIN_ROUTE);
    }

    #[tokio::test]
    async fn test_server_error_is_returned_to_caller() {
        let h = harness(HOME_ROUTE).await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "database down"})),
            )
            .mount(&h.server)
            .await;

        let err = h.api.list_products().await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(h.routes.redirects().is_empty());
    }

    #[tokio::test]
    async fn test_non_json_success_degrades_to_empty() {
        let h = harness(HOME_ROUTE).await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&h.server)
            .await;

        assert!(h.api.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_scope_aborts_request() {
        let h = harness(HOME_ROUTE).await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&h.server)
            .await;

        let token = CancellationToken::new();
        let scoped = h.api.with_cancellation(token.clone());
        let pending = tokio::spawn(async move { scoped.list_products().await });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        token.cancel();

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }
}
