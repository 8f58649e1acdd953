//! Admin error type.

use hemline_client::ApiError;
use hemline_core::{OrderId, ProductInputError, TransitionError};
use thiserror::Error;

/// Errors surfaced by admin screen actions.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Backend request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Product form failed validation; nothing was sent.
    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductInputError),

    /// Category form failed validation; nothing was sent.
    #[error("category name is required")]
    MissingCategoryName,

    /// The status change is not allowed under the active policy.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The order is not known locally or to the backend.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
}

impl AdminError {
    /// Whether retrying the same action might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            _ => false,
        }
    }
}
