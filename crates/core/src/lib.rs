//! Hemline Core - Shared domain types.
//!
//! This crate provides the types used across all Hemline components:
//! - `client` - REST client, durable storage and auth session
//! - `storefront` - Cart store, checkout and catalog browsing
//! - `admin` - Product, category and order management screens
//! - `cli` - Terminal front-end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, phone numbers, order statuses and the
//!   product/category/order/cart records exchanged with the API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
