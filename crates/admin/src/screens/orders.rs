//! Orders management screen.
//!
//! Status changes go through the dedicated status endpoint, one at a time,
//! after the active [`TransitionPolicy`] has approved them.

use hemline_client::{ApiClient, ApiError, FetchScope, Loadable, Notifications};
use hemline_core::{Order, OrderId, OrderStatus};

use super::{contains_ci, load_into};
use crate::config::TransitionPolicy;
use crate::error::AdminError;

/// List filter for the orders table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Matched against customer name, phone and order id.
    pub search: String,
}

impl OrderFilter {
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|status| order.status != status) {
            return false;
        }
        let search = self.search.trim();
        contains_ci(&order.customer_name, search)
            || contains_ci(&order.customer_phone, search)
            || order
                .id
                .as_ref()
                .is_some_and(|id| contains_ci(id.as_str(), search))
    }
}

#[derive(Debug)]
pub struct OrdersScreen {
    scope: FetchScope,
    api: ApiClient,
    policy: TransitionPolicy,
    orders: Loadable<Vec<Order>>,
    pub filter: OrderFilter,
    pub notices: Notifications,
}

impl OrdersScreen {
    #[must_use]
    pub fn new(api: &ApiClient, policy: TransitionPolicy) -> Self {
        let scope = FetchScope::new();
        let api = scope.client(api);
        Self {
            scope,
            api,
            policy,
            orders: Loadable::Idle,
            filter: OrderFilter::default(),
            notices: Notifications::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &Loadable<Vec<Order>> {
        &self.orders
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Order> {
        self.orders
            .value()
            .map(|all| all.iter().filter(|o| self.filter.matches(o)).collect())
            .unwrap_or_default()
    }

    /// Statuses offered for `order` under the active policy.
    #[must_use]
    pub fn status_options(&self, order: &Order) -> Vec<OrderStatus> {
        self.policy.targets(order.status)
    }

    pub async fn load(&mut self) {
        load_into(
            &mut self.orders,
            &mut self.notices,
            "orders",
            self.api.list_orders(),
        )
        .await;
    }

    pub async fn retry(&mut self) {
        if matches!(self.orders, Loadable::Failed { .. }) {
            self.load().await;
        }
    }

    /// Move an order to `to`.
    ///
    /// The current status comes from the loaded list, or from the backend
    /// when the order is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy forbids the change (nothing is sent),
    /// the order does not exist, or the backend rejects the update.
    pub async fn update_status(&mut self, id: &OrderId, to: OrderStatus) -> Result<Order, AdminError> {
        let current = match self.find(id) {
            Some(order) => order.clone(),
            None => self.fetch(id).await?,
        };

        if let Err(e) = self.policy.check(current.status, to) {
            tracing::warn!(order_id = %id, error = %e, "Status change refused");
            self.notices.error(e.to_string());
            return Err(e.into());
        }

        let updated = match self.api.update_order_status(id, to).await {
            Ok(echoed) => echoed.unwrap_or(Order {
                status: to,
                ..current
            }),
            Err(e) => {
                tracing::error!(order_id = %id, error = %e, "Failed to update order status");
                self.notices.error(format!("Failed to update order {id}: {e}"));
                return Err(e.into());
            }
        };

        tracing::info!(order_id = %id, status = %updated.status, "Order status updated");
        self.notices
            .success(format!("Order {id} marked {}", updated.status));
        if let Some(slot) = self.find_mut(id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    pub async fn delete(&mut self, id: &OrderId) -> Result<(), AdminError> {
        if let Err(e) = self.api.delete_order(id).await {
            tracing::error!(order_id = %id, error = %e, "Failed to delete order");
            self.notices.error(format!("Failed to delete order {id}: {e}"));
            return Err(e.into());
        }
        self.notices.success(format!("Order {id} deleted"));
        if let Some(orders) = self.orders.value_mut() {
            orders.retain(|o| o.id.as_ref() != Some(id));
        }
        Ok(())
    }

    async fn fetch(&mut self, id: &OrderId) -> Result<Order, AdminError> {
        match self.api.get_order(id).await {
            Ok(order) => Ok(order),
            Err(ApiError::Status { status: 404, .. } | ApiError::MissingEntity(_)) => {
                self.notices.error(format!("Order {id} not found"));
                Err(AdminError::OrderNotFound(id.clone()))
            }
            Err(e) => {
                self.notices.error(format!("Failed to load order {id}: {e}"));
                Err(e.into())
            }
        }
    }

    fn find(&self, id: &OrderId) -> Option<&Order> {
        self.orders
            .value()
            .and_then(|orders| orders.iter().find(|o| o.id.as_ref() == Some(id)))
    }

    fn find_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders
            .value_mut()
            .and_then(|orders| orders.iter_mut().find(|o| o.id.as_ref() == Some(id)))
    }

    pub fn cancel(&self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{api_for, order_json};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn loaded(server: &MockServer, policy: TransitionPolicy) -> OrdersScreen {
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": [
                order_json("o1", "Ada", "pending"),
                order_json("o2", "Grace", "shipped"),
                order_json("o3", "Alan", "delivered"),
            ]})))
            .mount(server)
            .await;
        let mut screen = OrdersScreen::new(&api_for(server), policy);
        screen.load().await;
        screen
    }

    #[tokio::test]
    async fn test_filter_by_status_and_customer() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server, TransitionPolicy::Strict).await;
        assert_eq!(screen.visible().len(), 3);

        screen.filter.status = Some(OrderStatus::Shipped);
        assert_eq!(screen.visible()[0].customer_name, "Grace");

        screen.filter = OrderFilter {
            status: None,
            search: "al".to_string(),
        };
        assert_eq!(screen.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_strict_forward_step_is_sent() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server, TransitionPolicy::Strict).await;
        Mock::given(method("PATCH"))
            .and(path("/api/orders/o1/status"))
            .and(body_json(json!({"status": "processing"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let updated = screen
            .update_status(&OrderId::from("o1"), OrderStatus::Processing)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);
        assert_eq!(screen.visible()[0].status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_strict_refuses_skip_without_request() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server, TransitionPolicy::Strict).await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = screen
            .update_status(&OrderId::from("o1"), OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Transition(_)));
        assert_eq!(screen.visible()[0].status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_permissive_allows_skip() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server, TransitionPolicy::Permissive).await;
        Mock::given(method("PATCH"))
            .and(path("/api/orders/o1/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "order": order_json("o1", "Ada", "delivered")
            })))
            .mount(&server)
            .await;

        let updated = screen
            .update_status(&OrderId::from("o1"), OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_unloaded_order_is_fetched_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders/o9"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": order_json("o9", "Lin", "shipped")})),
            )
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/orders/o9/status"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/orders/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut screen = OrdersScreen::new(&api_for(&server), TransitionPolicy::Strict);
        let updated = screen
            .update_status(&OrderId::from("o9"), OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(updated.customer_name, "Lin");

        let err = screen
            .update_status(&OrderId::from("nope"), OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::OrderNotFound(_)));
    }

    #[tokio::test]
    async fn test_status_options_follow_policy() {
        let server = MockServer::start().await;
        let screen = loaded(&server, TransitionPolicy::Strict).await;
        let pending = screen.visible()[0].clone();
        assert_eq!(
            screen.status_options(&pending),
            vec![OrderStatus::Processing, OrderStatus::Cancelled]
        );
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server, TransitionPolicy::Strict).await;
        Mock::given(method("DELETE"))
            .and(path("/api/orders/o3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        screen.delete(&OrderId::from("o3")).await.unwrap();
        assert_eq!(screen.visible().len(), 2);
    }
}
