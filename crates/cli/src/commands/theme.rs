//! Theme commands.

use std::sync::Arc;

use hemline_storefront::ThemePreference;

use super::{CliError, Context};
use crate::output;

pub fn show(ctx: &Context) {
    let preference = ThemePreference::load(Arc::clone(&ctx.storage));
    output::line(&format!("Theme: {}", preference.theme()));
}

pub fn toggle(ctx: &Context) -> Result<(), CliError> {
    let mut preference = ThemePreference::load(Arc::clone(&ctx.storage));
    let theme = preference.toggle()?;
    output::line(&format!("Theme: {theme}"));
    Ok(())
}
