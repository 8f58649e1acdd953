//! Admin console commands.
//!
//! # Usage
//!
//! ```bash
//! # Products
//! hemline admin products create --name "Linen Shirt" --price 60 --category shirts --stock 12
//! hemline admin products upload ./linen-front.jpg
//!
//! # Orders
//! hemline admin orders list --status pending
//! hemline admin orders status 65a9d0 processing
//! ```
//!
//! Every command needs a signed-in session (`hemline login`). The order status
//! policy is read from `HEMLINE_ORDER_TRANSITIONS`.

use std::path::Path;

use hemline_admin::{
    CategoriesScreen, OrderFilter, OrdersScreen, ProductsScreen, load_dashboard,
};
use hemline_client::{Loadable, Notifications};
use hemline_core::{CategoryId, CategoryInput, OrderId, OrderStatus, ProductId, ProductInput};

use super::{CliError, Context};
use crate::output;

pub async fn create_product(ctx: &Context, input: ProductInput) -> Result<(), CliError> {
    let mut screen = ProductsScreen::new(&ctx.api);
    let result = screen.create(&input).await;
    flush(&mut screen.notices);
    let product = result?;
    output::product_detail(&product);
    Ok(())
}

pub async fn update_product(ctx: &Context, id: &ProductId, input: ProductInput) -> Result<(), CliError> {
    let mut screen = ProductsScreen::new(&ctx.api);
    let result = screen.update(id, &input).await;
    flush(&mut screen.notices);
    let product = result?;
    output::product_detail(&product);
    Ok(())
}

pub async fn delete_product(ctx: &Context, id: &ProductId) -> Result<(), CliError> {
    let mut screen = ProductsScreen::new(&ctx.api);
    let result = screen.delete(id).await;
    flush(&mut screen.notices);
    Ok(result?)
}

/// Upload an image file and print the URL the backend stored it under.
pub async fn upload_image(ctx: &Context, file: &Path) -> Result<(), CliError> {
    let bytes = tokio::fs::read(file).await.map_err(|source| CliError::Io {
        path: file.display().to_string(),
        source,
    })?;
    let file_name = file
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

    tracing::debug!(file = %file.display(), size = bytes.len(), "Uploading image");
    let mut screen = ProductsScreen::new(&ctx.api);
    let result = screen.upload_image(&file_name, bytes).await;
    flush(&mut screen.notices);
    output::line(&result?);
    Ok(())
}

pub async fn create_category(ctx: &Context, name: String, description: String) -> Result<(), CliError> {
    let mut screen = CategoriesScreen::new(&ctx.api);
    let result = screen.create(&CategoryInput { name, description }).await;
    flush(&mut screen.notices);
    let category = result?;
    output::categories(std::slice::from_ref(&category));
    Ok(())
}

pub async fn update_category(
    ctx: &Context,
    id: &CategoryId,
    name: String,
    description: String,
) -> Result<(), CliError> {
    let mut screen = CategoriesScreen::new(&ctx.api);
    let result = screen.update(id, &CategoryInput { name, description }).await;
    flush(&mut screen.notices);
    let category = result?;
    output::categories(std::slice::from_ref(&category));
    Ok(())
}

pub async fn delete_category(ctx: &Context, id: &CategoryId) -> Result<(), CliError> {
    let mut screen = CategoriesScreen::new(&ctx.api);
    let result = screen.delete(id).await;
    flush(&mut screen.notices);
    Ok(result?)
}

pub async fn list_orders(ctx: &Context, filter: OrderFilter) -> Result<(), CliError> {
    let mut screen = OrdersScreen::new(&ctx.api, ctx.admin.transition_policy);
    screen.filter = filter;
    screen.load().await;

    if let Loadable::Failed { message, .. } = screen.state() {
        return Err(CliError::Usage(message.clone()));
    }
    let orders: Vec<_> = screen.visible().into_iter().cloned().collect();
    output::orders(&orders);
    Ok(())
}

pub async fn update_status(ctx: &Context, id: &OrderId, status: OrderStatus) -> Result<(), CliError> {
    let mut screen = OrdersScreen::new(&ctx.api, ctx.admin.transition_policy);
    let result = screen.update_status(id, status).await;
    flush(&mut screen.notices);
    let order = result?;
    output::orders(std::slice::from_ref(&order));
    Ok(())
}

pub async fn delete_order(ctx: &Context, id: &OrderId) -> Result<(), CliError> {
    let mut screen = OrdersScreen::new(&ctx.api, ctx.admin.transition_policy);
    let result = screen.delete(id).await;
    flush(&mut screen.notices);
    Ok(result?)
}

pub async fn dashboard(ctx: &Context) -> Result<(), CliError> {
    let stats = load_dashboard(&ctx.api, ctx.admin.low_stock_threshold).await?;
    output::dashboard(&stats, ctx.admin.low_stock_threshold);
    Ok(())
}

/// Print success notices; failures surface as the command error instead.
fn flush(notices: &mut Notifications) {
    for notice in notices.drain() {
        if notice.level != hemline_client::NoticeLevel::Error {
            output::line(&notice.message);
        }
    }
}
