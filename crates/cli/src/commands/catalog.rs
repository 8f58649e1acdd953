//! Catalog browsing commands.

use hemline_core::ProductId;
use hemline_storefront::ProductFilter;

use super::{CliError, Context};
use crate::output;

pub async fn list_products(ctx: &Context, filter: &ProductFilter) -> Result<(), CliError> {
    let products = ctx.catalog().browse(filter).await?;
    output::products(&products);
    Ok(())
}

pub async fn show_product(ctx: &Context, id: &ProductId) -> Result<(), CliError> {
    let product = ctx.catalog().product(id).await?;
    output::product_detail(&product);
    Ok(())
}

pub async fn list_categories(ctx: &Context) -> Result<(), CliError> {
    let categories = ctx.catalog().categories().await?;
    output::categories(&categories);
    Ok(())
}
