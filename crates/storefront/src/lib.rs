//! Hemline storefront library.
//!
//! The customer-facing half of the application:
//!
//! - [`cart`] - The cart store, persisted across sessions
//! - [`checkout`] - Form validation and order submission
//! - [`catalog`] - Cached product and category browsing
//! - [`theme`] - Dark/light preference
//! - [`whatsapp`] - Order summaries as chat deep links

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod theme;
pub mod whatsapp;

pub use cart::CartStore;
pub use catalog::{Catalog, ProductFilter, SortOrder};
pub use checkout::{
    Checkout, CheckoutConfirmation, CheckoutError, CheckoutForm, Field, FieldError, FormErrors,
    build_order,
};
pub use config::StorefrontConfig;
pub use theme::{Theme, ThemePreference};
pub use whatsapp::DeepLinkError;
