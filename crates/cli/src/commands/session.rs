//! Sign-in and sign-out.

use hemline_client::LOGIN_ROUTE;
use secrecy::SecretString;

use super::{CliError, Context};
use crate::output;

pub async fn login(ctx: &Context, email: &str, password: SecretString) -> Result<(), CliError> {
    // A rejected login must not bounce back to the login route
    ctx.routes.visit(LOGIN_ROUTE);
    let user = ctx.api.login(email, &password).await?;
    let name = if user.name.is_empty() {
        user.email.as_str()
    } else {
        user.name.as_str()
    };
    output::line(&format!("Signed in as {name}"));
    Ok(())
}

pub fn logout(ctx: &Context) {
    ctx.api.logout();
    output::line("Signed out");
}
