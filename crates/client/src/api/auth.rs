//! Sign-in and sign-out.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use super::{ApiClient, ApiError, envelope};
use crate::session::SessionUser;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a bearer token and persist the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the credentials, answers
    /// without a token, or the session cannot be stored.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SessionUser, ApiError> {
        let request = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let body = self
            .send(self.request(Method::POST, "auth/login").json(&request))
            .await?;

        let token = envelope::string_field(&body, &["token", "accessToken"])
            .map(SecretString::from)
            .ok_or(ApiError::MissingEntity("token"))?;
        // Every user field defaults, so any object parses; keep only real records
        let user = envelope::entity::<SessionUser>(&body, "user")
            .filter(|user| !user.email.is_empty() || user.id.is_some())
            .unwrap_or_else(|| SessionUser {
                email: email.to_string(),
                ..SessionUser::default()
            });

        self.session().store(&token, Some(&user))?;
        tracing::info!(email, "Signed in");
        Ok(user)
    }

    /// Forget the local session. No backend call is made.
    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("Signed out");
    }
}
