//! Hemline admin console library.
//!
//! CRUD screens for products, categories and orders, plus the dashboard
//! summary. Screens talk to the backend through [`hemline_client::ApiClient`]
//! and keep their lists in sync with every successful mutation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod screens;

pub use config::{AdminConfig, TransitionPolicy};
pub use dashboard::{DashboardStats, load_dashboard};
pub use error::AdminError;
pub use screens::{CategoriesScreen, OrderFilter, OrdersScreen, ProductFilter, ProductsScreen};
