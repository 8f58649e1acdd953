//! Integration tests for session expiry.
//!
//! A 401 from any endpoint must drop the stored session and send the user
//! to the login route, unless they are already there.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use hemline_client::{ApiError, AuthSession, LOGIN_ROUTE, Navigator};
use hemline_integration_tests::TestContext;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn sign_in(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "tok-abc", "user": {"email": "admin@example.com", "role": "admin"}}
        })))
        .mount(&ctx.server)
        .await;
    ctx.api
        .login("admin@example.com", &SecretString::from("pw"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_401_clears_session_and_redirects() {
    let ctx = TestContext::new("/admin/products").await;
    sign_in(&ctx).await;
    assert!(AuthSession::new(ctx.reopen_storage()).is_authenticated());

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&ctx.server)
        .await;

    let err = ctx.api.list_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));

    let session = AuthSession::new(ctx.reopen_storage());
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert_eq!(ctx.routes.current_route(), LOGIN_ROUTE);
    assert_eq!(ctx.routes.redirects(), vec![LOGIN_ROUTE.to_string()]);
}

#[tokio::test]
async fn test_401_on_login_route_does_not_redirect() {
    let ctx = TestContext::new(LOGIN_ROUTE).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .api
        .login("admin@example.com", &SecretString::from("wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(ctx.routes.redirects().is_empty());
}

#[tokio::test]
async fn test_public_reads_work_without_token() {
    let ctx = TestContext::new("/").await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"categories": [{"_id": "c1", "name": "Shirts"}]})))
        .mount(&ctx.server)
        .await;

    let categories = ctx.api.list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);

    let requests = ctx.server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}
