//! Orders submitted at checkout and managed from the admin console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId};
use super::phone::Phone;
use super::price::Price;
use super::status::OrderStatus;

/// Validated contact and delivery details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: Phone,
    pub address: String,
}

/// One purchased line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Price,
    pub quantity: u32,
    pub size: String,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A submitted purchase request.
///
/// The item list is fixed once the order exists; only `status` changes
/// afterwards, and only through the admin status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: Price,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Build a new pending order for `customer`.
    #[must_use]
    pub fn new(customer: &CustomerDetails, items: Vec<OrderItem>, total: Price) -> Self {
        Self {
            id: None,
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.to_string(),
            customer_address: customer.address.clone(),
            items,
            total,
            status: OrderStatus::Pending,
            created_at: None,
        }
    }

    /// Sum of price x quantity over the items, independent of `total`.
    #[must_use]
    pub fn items_total(&self) -> Price {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Number of units across all items.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
