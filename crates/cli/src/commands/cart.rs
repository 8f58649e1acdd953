//! Cart commands.

use hemline_core::{CartLineId, Product, ProductId};

use super::{CliError, Context};
use crate::output;

pub fn show(ctx: &Context) {
    output::cart(&ctx.cart());
}

/// Add a product after checking size and stock.
pub async fn add(
    ctx: &Context,
    product_id: &ProductId,
    size: Option<&str>,
    quantity: u32,
) -> Result<(), CliError> {
    let product = ctx.catalog().product(product_id).await?;
    let size = resolve_size(&product, size)?;

    let mut cart = ctx.cart();
    let wanted = cart.quantity_of(&product.id, &size).saturating_add(quantity);
    if !product.can_supply(wanted) {
        return Err(CliError::Usage(format!(
            "only {} of {} in stock ({} already in cart)",
            product.stock,
            product.name,
            cart.quantity_of(&product.id, &size)
        )));
    }

    match cart.add_to_cart(&product, &size, quantity) {
        Some(line) => output::line(&format!("Added {quantity} x {} to cart ({line})", product.name)),
        None => output::line("Nothing added"),
    }
    output::cart(&cart);
    Ok(())
}

pub fn remove(ctx: &Context, line: &CartLineId) -> Result<(), CliError> {
    let mut cart = ctx.cart();
    if cart.line(line).is_none() {
        return Err(CliError::Usage(format!("no cart line {line}")));
    }
    cart.remove_from_cart(line);
    output::cart(&cart);
    Ok(())
}

pub fn update(ctx: &Context, line: &CartLineId, quantity: i64) -> Result<(), CliError> {
    let mut cart = ctx.cart();
    if cart.line(line).is_none() {
        return Err(CliError::Usage(format!("no cart line {line}")));
    }
    if quantity < 1 {
        return Err(CliError::Usage(
            "quantity must be at least 1; use `cart remove` to delete a line".to_string(),
        ));
    }
    cart.update_quantity(line, quantity);
    output::cart(&cart);
    Ok(())
}

pub fn clear(ctx: &Context) {
    let mut cart = ctx.cart();
    cart.clear_cart();
    output::line("Cart cleared");
}

fn resolve_size(product: &Product, size: Option<&str>) -> Result<String, CliError> {
    match size {
        Some(size) if product.offers_size(size) => Ok(product
            .sizes
            .iter()
            .find(|s| s.eq_ignore_ascii_case(size))
            .cloned()
            .unwrap_or_else(|| size.to_string())),
        Some(size) => Err(CliError::Usage(format!(
            "{} is not available in size {size} (sizes: {})",
            product.name,
            product.sizes.join(", ")
        ))),
        None if product.sizes.is_empty() => Ok(String::new()),
        None => Err(CliError::Usage(format!(
            "choose a size for {}: {}",
            product.name,
            product.sizes.join(", ")
        ))),
    }
}
