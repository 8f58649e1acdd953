//! Request lifetimes and loading state for screens.
//!
//! A screen owns a [`FetchScope`]. Requests issued through
//! [`FetchScope::client`] are abandoned when the scope is dropped or
//! cancelled, so a response that arrives after the user has navigated away
//! never writes into a dead screen.

use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, ApiError};

/// Cancellation boundary tied to one screen's lifetime.
#[derive(Debug, Default)]
pub struct FetchScope {
    token: CancellationToken,
}

impl FetchScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose requests end with [`ApiError::Cancelled`] once this
    /// scope goes away.
    #[must_use]
    pub fn client(&self, api: &ApiClient) -> ApiClient {
        api.with_cancellation(self.token.child_token())
    }

    /// Abandon every outstanding request made through this scope.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for FetchScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Loading state of one piece of remote data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    /// Nothing requested yet (or the request was abandoned).
    Idle,
    Loading,
    Ready(T),
    /// The last attempt failed; `retryable` drives the retry affordance.
    Failed { message: String, retryable: bool },
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Loadable<T> {
    /// Fold a request result into a state.
    ///
    /// A cancelled request returns to [`Loadable::Idle`] rather than
    /// reporting an error nobody asked about.
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(ApiError::Cancelled) => Self::Idle,
            Err(e) => Self::Failed {
                retryable: e.is_retryable(),
                message: e.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Failed { retryable: true, .. })
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub const fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Error message of a failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::tests::harness;
    use crate::session::HOME_ROUTE;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_from_result() {
        let ready: Loadable<u8> = Loadable::from_result(Ok(3));
        assert_eq!(ready.value(), Some(&3));

        let cancelled: Loadable<u8> = Loadable::from_result(Err(ApiError::Cancelled));
        assert_eq!(cancelled, Loadable::Idle);

        let failed: Loadable<u8> = Loadable::from_result(Err(ApiError::Status {
            status: 503,
            message: "busy".to_string(),
        }));
        assert!(failed.is_retryable());
        assert!(failed.error().unwrap().contains("busy"));
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(Loadable::<Vec<u8>>::default(), Loadable::Idle);
        assert!(Loadable::<u8>::Loading.is_loading());
    }

    #[tokio::test]
    async fn test_dropping_scope_cancels_requests() {
        let h = harness(HOME_ROUTE).await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&h.server)
            .await;

        let scope = FetchScope::new();
        let scoped = scope.client(&h.api);
        let pending = tokio::spawn(async move { scoped.list_categories().await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(scope);

        let state = Loadable::from_result(pending.await.unwrap());
        assert_eq!(state, Loadable::Idle);
    }

    #[tokio::test]
    async fn test_live_scope_completes() {
        let h = harness(HOME_ROUTE).await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Tops"}])))
            .mount(&h.server)
            .await;

        let scope = FetchScope::new();
        let categories = scope.client(&h.api).list_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert!(!scope.is_cancelled());
    }
}
