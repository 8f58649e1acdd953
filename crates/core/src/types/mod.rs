//! Core types for Hemline.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! records exchanged with the REST backend.

pub mod cart;
pub mod category;
pub mod id;
pub mod order;
pub mod phone;
pub mod price;
pub mod product;
pub mod status;

pub use cart::CartLineItem;
pub use category::{Category, CategoryInput, with_product_counts};
pub use id::*;
pub use order::{CustomerDetails, Order, OrderItem};
pub use phone::{Phone, PhoneError};
pub use price::Price;
pub use product::{CategoryRef, Product, ProductInput, ProductInputError};
pub use status::{OrderStatus, TransitionError};
