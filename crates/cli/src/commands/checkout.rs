//! Checkout commands.

use hemline_client::{HOME_ROUTE, Navigator};
use hemline_storefront::checkout::{Checkout, CheckoutError, CheckoutForm};
use hemline_storefront::whatsapp;

use super::{CliError, Context};
use crate::output;

const CHECKOUT_ROUTE: &str = "/checkout";

pub async fn submit(ctx: &Context, form: &CheckoutForm) -> Result<(), CliError> {
    let mut cart = ctx.cart();
    ctx.routes.visit(CHECKOUT_ROUTE);

    let checkout = Checkout::new(ctx.api.clone(), ctx.storefront.checkout_redirect);
    let confirmation = checkout.submit(&mut cart, form).await?;
    output::confirmation(&confirmation.order);

    // The process exits after printing, so there is no confirmation screen to hold
    ctx.routes.redirect(HOME_ROUTE);
    tracing::debug!(
        route = %ctx.routes.current_route(),
        skipped_delay = ?confirmation.redirect_after,
        "Returned home"
    );
    Ok(())
}

/// Print a chat link carrying the cart instead of submitting it.
pub fn whatsapp(ctx: &Context, form: &CheckoutForm) -> Result<(), CliError> {
    let number = ctx.storefront.whatsapp_number.as_ref().ok_or_else(|| {
        CliError::Usage("HEMLINE_WHATSAPP_NUMBER is not set".to_string())
    })?;

    let cart = ctx.cart();
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    let blank = *form == CheckoutForm::default();
    let customer = if blank {
        None
    } else {
        Some(form.validate().map_err(CheckoutError::Invalid)?)
    };

    let message = whatsapp::cart_message(&cart, customer.as_ref());
    let url = whatsapp::deep_link(number, &message)?;
    output::line(url.as_str());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use hemline_admin::AdminConfig;
    use hemline_client::{ApiClient, ApiConfig, AuthSession, FileStorage, RouteState, Storage};
    use hemline_core::Product;
    use hemline_storefront::StorefrontConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn context(server: &MockServer, dir: &std::path::Path, redirect: Duration) -> Context {
        let config = ApiConfig::for_base_url(&format!("{}/api", server.uri())).unwrap();
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(dir).unwrap());
        let routes = Arc::new(RouteState::default());
        let api = ApiClient::new(
            &config,
            AuthSession::new(Arc::clone(&storage)),
            Arc::clone(&routes) as Arc<dyn Navigator>,
        )
        .unwrap();
        let mut storefront = StorefrontConfig::with_api(config);
        storefront.checkout_redirect = redirect;
        Context {
            api,
            storage,
            routes,
            storefront,
            admin: AdminConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_submit_returns_home_without_waiting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server, dir.path(), Duration::from_secs(600));

        let shirt: Product =
            serde_json::from_value(json!({"_id": "p1", "name": "Linen Shirt", "price": 60, "stock": 4}))
                .unwrap();
        ctx.cart().add_to_cart(&shirt, "M", 1);

        let form = CheckoutForm {
            name: "Ada".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            address: "12 Loom Street".to_string(),
        };
        tokio::time::timeout(Duration::from_secs(5), submit(&ctx, &form))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(ctx.routes.redirects(), vec![HOME_ROUTE.to_string()]);
        assert!(ctx.cart().is_empty());
    }
}
