//! The shopping cart store.
//!
//! [`CartStore`] is the single owner of the cart lines and of the cart panel's
//! open/closed flag. It is created once per session with [`CartStore::load`]
//! and passed explicitly to whatever needs it (checkout, the CLI).
//!
//! Every mutation re-serializes the full line list to durable storage under
//! [`keys::CART`]. A failed write is logged and otherwise ignored: the
//! in-memory cart stays authoritative for the rest of the session.

use std::sync::Arc;

use hemline_client::storage::{Storage, keys};
use hemline_core::{CartLineId, CartLineItem, Price, Product, ProductId};

/// Owned cart state backed by durable storage.
pub struct CartStore {
    lines: Vec<CartLineItem>,
    open: bool,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Rehydrate the cart from storage.
    ///
    /// A missing entry is an empty cart. An unreadable or unparseable entry
    /// is logged and also treated as an empty cart.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let lines = match storage.get(keys::CART) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<CartLineItem>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart");
                Vec::new()
            }
        };
        tracing::debug!(lines = lines.len(), "Cart loaded");

        Self {
            lines,
            open: false,
            storage,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product` in `size`.
    ///
    /// An existing line for the same product and size is incremented;
    /// otherwise a new line is appended. Stock is not checked here, callers
    /// do that first (see [`CartStore::quantity_of`]).
    ///
    /// Returns the affected line's id, or `None` when `quantity` is zero.
    pub fn add_to_cart(&mut self, product: &Product, size: &str, quantity: u32) -> Option<CartLineId> {
        if quantity == 0 {
            return None;
        }

        let id = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.is_for(&product.id, size))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            line.cart_line_id.clone()
        } else {
            let line = CartLineItem {
                cart_line_id: CartLineId::generate(),
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                selected_size: size.to_string(),
                quantity,
                image: product.primary_image().map(str::to_string),
            };
            let id = line.cart_line_id.clone();
            self.lines.push(line);
            id
        };

        tracing::debug!(product_id = %product.id, size, quantity, "Added to cart");
        self.persist();
        Some(id)
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_from_cart(&mut self, id: &CartLineId) {
        let before = self.lines.len();
        self.lines.retain(|line| &line.cart_line_id != id);
        if self.lines.len() != before {
            tracing::debug!(cart_line_id = %id, "Removed from cart");
        }
        self.persist();
    }

    /// Set a line's quantity exactly.
    ///
    /// Quantities below 1 are ignored; removing a line is
    /// [`CartStore::remove_from_cart`]'s job.
    pub fn update_quantity(&mut self, id: &CartLineId, quantity: i64) {
        let Ok(quantity) = u32::try_from(quantity) else {
            return;
        };
        if quantity < 1 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| &line.cart_line_id == id) {
            line.quantity = quantity;
        }
        self.persist();
    }

    pub fn clear_cart(&mut self) {
        self.lines.clear();
        tracing::debug!("Cart cleared");
        self.persist();
    }

    pub const fn open_cart(&mut self) {
        self.open = true;
    }

    pub const fn close_cart(&mut self) {
        self.open = false;
    }

    pub const fn toggle_cart(&mut self) {
        self.open = !self.open;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: &CartLineId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.cart_line_id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units already in the cart for `product_id` in `size`.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId, size: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.is_for(product_id, size))
            .map_or(0, |line| line.quantity)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of price x quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.lines) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(keys::CART, &json) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}
