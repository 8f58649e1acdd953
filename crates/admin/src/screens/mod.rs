//! Admin CRUD screens.
//!
//! Each screen owns a [`FetchScope`](hemline_client::FetchScope): dropping the
//! screen abandons whatever it still has in flight. Lists are held as
//! [`Loadable`] so a failed load leaves the screen in a retryable state
//! rather than an empty one.

mod categories;
mod orders;
mod products;

pub use categories::CategoriesScreen;
pub use orders::{OrderFilter, OrdersScreen};
pub use products::{ProductFilter, ProductsScreen};

use std::future::Future;

use hemline_client::{ApiError, Loadable, Notifications};

/// Load a list into `state`, reporting failures as notices.
async fn load_into<T>(
    state: &mut Loadable<T>,
    notices: &mut Notifications,
    what: &str,
    request: impl Future<Output = Result<T, ApiError>>,
) {
    *state = Loadable::Loading;
    let result = request.await;
    if let Err(e) = &result
        && !matches!(e, ApiError::Cancelled)
    {
        tracing::error!(error = %e, what, "Failed to load");
        notices.error(format!("Failed to load {what}: {e}"));
    }
    *state = Loadable::from_result(result);
}

/// Case-insensitive substring match; an empty needle matches everything.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
