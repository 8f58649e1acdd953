//! Order summaries as prefilled WhatsApp chat links.
//!
//! An alternate checkout path: instead of submitting the order, the customer
//! opens a chat with the shop with the order already typed out.

use std::fmt::Write as _;

use hemline_core::{CustomerDetails, Order, Phone, Price};
use thiserror::Error;
use url::Url;

use crate::cart::CartStore;

const WA_BASE: &str = "https://wa.me";

#[derive(Debug, Error)]
pub enum DeepLinkError {
    #[error("messaging number has no digits")]
    NoDigits,
    #[error("failed to build deep link: {0}")]
    Url(#[from] url::ParseError),
}

/// Message for the current cart, optionally signed with customer details.
#[must_use]
pub fn cart_message(cart: &CartStore, customer: Option<&CustomerDetails>) -> String {
    let mut message = String::from("Hello! I'd like to order:\n");
    for line in cart.lines() {
        push_line(
            &mut message,
            line.quantity,
            &line.name,
            &line.selected_size,
            line.line_total(),
        );
    }
    let _ = write!(message, "\nTotal: {}", cart.total_price());
    if let Some(customer) = customer {
        push_customer(
            &mut message,
            &customer.name,
            customer.phone.as_str(),
            &customer.address,
        );
    }
    message
}

/// Message for a placed order.
#[must_use]
pub fn order_message(order: &Order) -> String {
    let mut message = match &order.id {
        Some(id) => format!("Hello! About my order {id}:\n"),
        None => String::from("Hello! I'd like to order:\n"),
    };
    for item in &order.items {
        push_line(
            &mut message,
            item.quantity,
            &item.product_name,
            &item.size,
            item.line_total(),
        );
    }
    let _ = write!(message, "\nTotal: {}", order.total);
    push_customer(
        &mut message,
        &order.customer_name,
        &order.customer_phone,
        &order.customer_address,
    );
    message
}

/// `https://wa.me/<digits>?text=<message>`
///
/// # Errors
///
/// Returns an error if `number` contains no digits.
pub fn deep_link(number: &Phone, message: &str) -> Result<Url, DeepLinkError> {
    let digits = number.digits();
    if digits.is_empty() {
        return Err(DeepLinkError::NoDigits);
    }
    let raw = format!("{WA_BASE}/{digits}?text={}", urlencoding::encode(message));
    Ok(Url::parse(&raw)?)
}

fn push_line(message: &mut String, quantity: u32, name: &str, size: &str, total: Price) {
    if size.is_empty() {
        let _ = writeln!(message, "- {quantity} x {name}: {total}");
    } else {
        let _ = writeln!(message, "- {quantity} x {name} ({size}): {total}");
    }
}

fn push_customer(message: &mut String, name: &str, phone: &str, address: &str) {
    let _ = write!(message, "\n\nName: {name}\nPhone: {phone}\nAddress: {address}");
}
