//! Integration tests for Hemline.
//!
//! Each test drives the real client, storefront and admin code against a
//! `wiremock` backend, with durable state in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hemline-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart persistence and order submission
//! - `admin_orders` - Order status changes under each transition policy
//! - `unauthorized` - Session expiry handling

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use hemline_client::{ApiClient, ApiConfig, AuthSession, FileStorage, RouteState, Storage};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::MockServer;

/// A mock backend plus a client wired to it.
pub struct TestContext {
    pub server: MockServer,
    pub storage: Arc<dyn Storage>,
    pub routes: Arc<RouteState>,
    pub api: ApiClient,
    dir: TempDir,
}

impl TestContext {
    /// Start a backend with the navigator on `route`.
    pub async fn new(route: &str) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(dir.path()).unwrap());
        let routes = Arc::new(RouteState::new(route));
        let api = client_for(&server, &storage, &routes);
        Self {
            server,
            storage,
            routes,
            api,
            dir,
        }
    }

    /// A second storage handle over the same directory, as a restarted
    /// process would open it.
    #[must_use]
    pub fn reopen_storage(&self) -> Arc<dyn Storage> {
        Arc::new(FileStorage::open(self.dir.path()).unwrap())
    }
}

fn client_for(server: &MockServer, storage: &Arc<dyn Storage>, routes: &Arc<RouteState>) -> ApiClient {
    let config = ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap();
    ApiClient::new(
        &config,
        AuthSession::new(Arc::clone(storage)),
        Arc::clone(routes) as Arc<dyn hemline_client::Navigator>,
    )
    .unwrap()
}

#[must_use]
pub fn product_json(id: &str, name: &str, price: i64, stock: u32, sizes: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": name,
        "price": price,
        "category": {"_id": "c1", "name": "Shirts"},
        "stock": stock,
        "images": [format!("/uploads/{id}.jpg")],
        "sizes": sizes,
    })
}

#[must_use]
pub fn order_json(id: &str, customer: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "customerName": customer,
        "customerPhone": "+44 20 7946 0000",
        "customerAddress": "12 Loom Street",
        "items": [{"productId": "p1", "productName": "Linen Shirt", "price": 60, "quantity": 1, "size": "M"}],
        "total": 60,
        "status": status,
        "createdAt": "2026-05-04T09:30:00Z",
    })
}
