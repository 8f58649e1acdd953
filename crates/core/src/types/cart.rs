//! Shopping cart line items.

use serde::{Deserialize, Serialize};

use super::id::{CartLineId, ProductId};
use super::order::OrderItem;
use super::price::Price;

/// One product+size combination in the cart.
///
/// `cart_line_id` is distinct from `product_id` so that the same product in
/// two sizes occupies two lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub cart_line_id: CartLineId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub selected_size: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartLineItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Returns `true` if this line holds `product_id` in `size`.
    #[must_use]
    pub fn is_for(&self, product_id: &ProductId, size: &str) -> bool {
        &self.product_id == product_id && self.selected_size == size
    }
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product_id.clone(),
            product_name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            size: line.selected_size.clone(),
        }
    }
}
