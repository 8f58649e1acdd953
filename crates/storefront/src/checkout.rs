//! Checkout: validate customer details, submit the cart as an order.
//!
//! The cart is cleared only after the backend has accepted the order. Any
//! failure leaves the cart exactly as it was so the customer can retry.

use std::fmt;
use std::time::Duration;

use hemline_client::session::{HOME_ROUTE, Navigator};
use hemline_client::{ApiClient, ApiError};
use hemline_core::{CustomerDetails, Order, OrderItem, Phone, PhoneError};
use thiserror::Error;

use crate::cart::CartStore;

/// A checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Address,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
        })
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),
    #[error("phone may only contain digits, spaces, +, - and parentheses")]
    InvalidPhone,
}

impl FieldError {
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Required(field) => *field,
            Self::InvalidPhone => Field::Phone,
        }
    }
}

/// Every field error found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// The error for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Raw customer input as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CheckoutForm {
    /// Validate every field independently.
    ///
    /// # Errors
    ///
    /// Returns all failing fields at once, never just the first.
    pub fn validate(&self) -> Result<CustomerDetails, FormErrors> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::Required(Field::Name));
        }

        let phone = match Phone::parse(&self.phone) {
            Ok(phone) => Some(phone),
            Err(PhoneError::Empty) => {
                errors.push(FieldError::Required(Field::Phone));
                None
            }
            Err(PhoneError::InvalidCharacter(_)) => {
                errors.push(FieldError::InvalidPhone);
                None
            }
        };

        let address = self.address.trim();
        if address.is_empty() {
            errors.push(FieldError::Required(Field::Address));
        }

        match phone {
            Some(phone) if errors.is_empty() => Ok(CustomerDetails {
                name: name.to_string(),
                phone,
                address: address.to_string(),
            }),
            _ => Err(FormErrors(errors)),
        }
    }
}

/// Errors that can occur while checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid checkout details: {0}")]
    Invalid(FormErrors),

    #[error("order submission failed: {0}")]
    Api(#[from] ApiError),
}

impl CheckoutError {
    /// Whether submitting again (unchanged) might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            Self::EmptyCart | Self::Invalid(_) => false,
        }
    }
}

/// Build the order payload for the current cart.
///
/// Items map one-to-one from cart lines; `total` is the cart's own total so
/// the submitted amount is exactly what the customer was shown.
#[must_use]
pub fn build_order(cart: &CartStore, customer: &CustomerDetails) -> Order {
    let items = cart.lines().iter().map(OrderItem::from).collect();
    Order::new(customer, items, cart.total_price())
}

/// Submits carts as orders.
#[derive(Debug, Clone)]
pub struct Checkout {
    api: ApiClient,
    redirect_after: Duration,
}

impl Checkout {
    #[must_use]
    pub const fn new(api: ApiClient, redirect_after: Duration) -> Self {
        Self {
            api,
            redirect_after,
        }
    }

    /// Validate `form`, submit the cart, and clear it on success.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` or `CheckoutError::Invalid` before
    /// anything is sent, and `CheckoutError::Api` if the backend rejects the
    /// order. The cart is untouched in every error case.
    #[tracing::instrument(skip_all, fields(lines = cart.lines().len()))]
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        form: &CheckoutForm,
    ) -> Result<CheckoutConfirmation, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let customer = form.validate().map_err(CheckoutError::Invalid)?;

        let order = build_order(cart, &customer);
        let stored = match self.api.create_order(&order).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(error = %e, "Checkout failed, cart kept");
                return Err(e.into());
            }
        };

        cart.clear_cart();
        cart.close_cart();
        tracing::info!(order_id = ?stored.id, total = %stored.total, "Checkout complete");

        Ok(CheckoutConfirmation {
            order: stored,
            redirect_after: self.redirect_after,
        })
    }
}

/// Successful checkout result shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfirmation {
    pub order: Order,
    pub redirect_after: Duration,
}

impl CheckoutConfirmation {
    /// Wait out the confirmation delay, then go back to the home route.
    pub async fn return_home(&self, navigator: &dyn Navigator) {
        tokio::time::sleep(self.redirect_after).await;
        navigator.redirect(HOME_ROUTE);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hemline_client::session::RouteState;
    use hemline_client::{ApiConfig, AuthSession, MemoryStorage, Storage};
    use hemline_core::{Price, Product};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Ada Lovelace".to_string(),
            phone: "+44 (20) 7946-0000".to_string(),
            address: "12 Loom Street".to_string(),
        }
    }

    fn tee() -> Product {
        serde_json::from_value(json!({"id": 1, "name": "Tee A", "price": 100, "stock": 5})).unwrap()
    }

    async fn setup() -> (MockServer, Checkout, CartStore) {
        let server = MockServer::start().await;
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let config = ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap();
        let api = ApiClient::new(
            &config,
            AuthSession::new(Arc::clone(&storage)),
            Arc::new(RouteState::default()),
        )
        .unwrap();
        let cart = CartStore::load(storage);
        (server, Checkout::new(api, Duration::ZERO), cart)
    }

    #[test]
    fn test_valid_form() {
        let customer = valid_form().validate().unwrap();
        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.phone.as_str(), "+44 (20) 7946-0000");
    }

    #[test]
    fn test_empty_phone_flags_only_phone() {
        let form = CheckoutForm {
            phone: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Phone),
            Some(&FieldError::Required(Field::Phone))
        );
        assert!(errors.get(Field::Name).is_none());
        assert!(errors.get(Field::Address).is_none());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let form = CheckoutForm {
            name: "   ".to_string(),
            phone: "call me".to_string(),
            address: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Phone), Some(&FieldError::InvalidPhone));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let form = CheckoutForm {
            name: "  Ada ".to_string(),
            phone: " 0300 1234567 ".to_string(),
            address: "\t1 Loom St\n".to_string(),
        };
        let customer = form.validate().unwrap();
        assert_eq!(customer.name, "Ada");
        assert_eq!(customer.address, "1 Loom St");
    }

    #[tokio::test]
    async fn test_build_order_uses_cart_total() {
        let (_server, _checkout, mut cart) = setup().await;
        cart.add_to_cart(&tee(), "M", 2);
        cart.add_to_cart(&tee(), "L", 1);

        let order = build_order(&cart, &valid_form().validate().unwrap());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].product_name, "Tee A");
        assert_eq!(order.items[0].size, "M");
        assert_eq!(order.total, cart.total_price());
        assert_eq!(order.total, Price::from_units(300));
        assert_eq!(order.total, order.items_total());
    }

    #[tokio::test]
    async fn test_submit_clears_cart_on_success() {
        let (server, checkout, mut cart) = setup().await;
        cart.add_to_cart(&tee(), "M", 2);
        cart.open_cart();

        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .and(body_partial_json(json!({"total": 200, "customerName": "Ada Lovelace"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"order": {
                    "_id": "o-1",
                    "customerName": "Ada Lovelace",
                    "customerPhone": "+44 (20) 7946-0000",
                    "customerAddress": "12 Loom Street",
                    "items": [],
                    "total": 200
                }}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let confirmation = checkout.submit(&mut cart, &valid_form()).await.unwrap();
        assert_eq!(confirmation.order.id.unwrap().as_str(), "o-1");
        assert!(cart.is_empty());
        assert!(!cart.is_open());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_cart() {
        let (server, checkout, mut cart) = setup().await;
        cart.add_to_cart(&tee(), "M", 2);

        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = checkout.submit(&mut cart, &valid_form()).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(cart.total_items(), 2);
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_cart_and_bad_form_without_request() {
        let (server, checkout, mut cart) = setup().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = checkout.submit(&mut cart, &valid_form()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));

        cart.add_to_cart(&tee(), "S", 1);
        let err = checkout
            .submit(&mut cart, &CheckoutForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(ref errors) if errors.len() == 3));
        assert_eq!(cart.total_items(), 1);
    }

    #[tokio::test]
    async fn test_return_home_redirects() {
        let routes = RouteState::new("/checkout");
        let confirmation = CheckoutConfirmation {
            order: build_order(
                &CartStore::load(Arc::new(MemoryStorage::new())),
                &valid_form().validate().unwrap(),
            ),
            redirect_after: Duration::from_millis(10),
        };
        confirmation.return_home(&routes).await;
        assert_eq!(routes.current_route(), HOME_ROUTE);
    }
}
