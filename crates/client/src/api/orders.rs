//! Order endpoints.

use hemline_core::{Order, OrderId, OrderStatus};
use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use super::{ApiClient, ApiError, envelope};

impl ApiClient {
    /// Get all orders (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let body = self.send(self.request(Method::GET, "orders")).await?;
        Ok(envelope::collection(&body, "orders"))
    }

    /// Get a single order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no order.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        let body = self
            .send(self.request(Method::GET, &format!("orders/{id}")))
            .await?;
        envelope::entity(&body, "order").ok_or(ApiError::MissingEntity("order"))
    }

    /// Submit an order.
    ///
    /// Backends differ in whether they echo the stored order. When nothing
    /// recognizable comes back the submitted order is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, order), fields(items = order.items.len(), total = %order.total))]
    pub async fn create_order(&self, order: &Order) -> Result<Order, ApiError> {
        let body = self
            .send(self.request(Method::POST, "orders").json(order))
            .await?;
        let stored = envelope::entity(&body, "order").unwrap_or_else(|| {
            tracing::debug!("Order response carried no order, keeping submitted copy");
            order.clone()
        });
        tracing::info!(order_id = ?stored.id, "Order placed");
        Ok(stored)
    }

    /// Change an order's status.
    ///
    /// Returns the updated order when the backend echoes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, ApiError> {
        let body = self
            .send(
                self.request(Method::PATCH, &format!("orders/{id}/status"))
                    .json(&json!({ "status": status })),
            )
            .await?;
        Ok(envelope::entity(&body, "order"))
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("orders/{id}")))
            .await
            .map(drop)
    }
}
