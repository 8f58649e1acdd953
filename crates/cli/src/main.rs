//! Hemline CLI - browse, shop and administer from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! hemline products list --category shirts --sort price-asc
//!
//! # Shop
//! hemline cart add 64f1c2 --size M --quantity 2
//! hemline checkout --name "Ada" --phone "+44 20 7946 0000" --address "12 Loom St"
//!
//! # Administer
//! hemline login -e admin@example.com
//! hemline admin orders status 65a9d0 shipped
//! hemline admin dashboard
//! ```
//!
//! # Environment Variables
//!
//! See `ApiConfig`, `StorefrontConfig` and `AdminConfig`. Additionally:
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hemline_core::{CartLineId, CategoryId, OrderId, OrderStatus, Price, ProductId};
use hemline_storefront::SortOrder;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "hemline")]
#[command(author, version, about = "Hemline storefront and admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Browse categories
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart
    Checkout {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Print a WhatsApp link for the order instead of submitting it
        #[arg(long)]
        whatsapp: bool,
    },
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "HEMLINE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show or toggle the dark/light theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Admin console
    Admin {
        #[command(subcommand)]
        area: AdminArea,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        featured: bool,
        #[arg(long)]
        in_stock: bool,
        #[arg(long)]
        min_price: Option<Price>,
        #[arg(long)]
        max_price: Option<Price>,
        /// featured, price-asc, price-desc or name
        #[arg(long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Show one product
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CategoriesAction {
    /// List categories with product counts
    List,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        product: ProductId,
        #[arg(short, long)]
        size: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line
    Remove { line: CartLineId },
    /// Set a line's quantity
    Update {
        line: CartLineId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Subcommand)]
enum AdminArea {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: AdminProductsAction,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: AdminCategoriesAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: AdminOrdersAction,
    },
    /// Show the dashboard summary
    Dashboard,
}

#[derive(clap::Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub price: Price,
    #[arg(long)]
    pub original_price: Option<Price>,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value_t = 0)]
    pub stock: u32,
    /// Image URL (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,
    #[arg(long)]
    pub featured: bool,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Size label (repeatable)
    #[arg(long = "size")]
    pub sizes: Vec<String>,
}

#[derive(Subcommand)]
enum AdminProductsAction {
    Create(ProductArgs),
    Update {
        id: ProductId,
        #[command(flatten)]
        product: ProductArgs,
    },
    Delete {
        id: ProductId,
    },
    /// Upload an image file and print its URL
    Upload {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminCategoriesAction {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        id: CategoryId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        id: CategoryId,
    },
}

#[derive(Subcommand)]
enum AdminOrdersAction {
    List {
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Move an order to a new status
    Status { id: OrderId, status: OrderStatus },
    Delete {
        id: OrderId,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = hemline_client::config::get_optional_env("SENTRY_DSN")?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: hemline_client::config::get_optional_env("SENTRY_ENVIRONMENT")
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load .env before Sentry reads its DSN
    let _ = dotenvy::dotenv();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "hemline=warn,hemline_client=warn,hemline_storefront=warn,hemline_admin=warn".into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                search,
                featured,
                in_stock,
                min_price,
                max_price,
                sort,
            } => {
                let filter = hemline_storefront::ProductFilter {
                    category,
                    search,
                    featured_only: featured,
                    in_stock_only: in_stock,
                    min_price,
                    max_price,
                    sort,
                };
                commands::catalog::list_products(&ctx, &filter).await?;
            }
            ProductsAction::Show { id } => commands::catalog::show_product(&ctx, &id).await?,
        },
        Commands::Categories {
            action: CategoriesAction::List,
        } => commands::catalog::list_categories(&ctx).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add {
                product,
                size,
                quantity,
            } => commands::cart::add(&ctx, &product, size.as_deref(), quantity).await?,
            CartAction::Remove { line } => commands::cart::remove(&ctx, &line)?,
            CartAction::Update { line, quantity } => commands::cart::update(&ctx, &line, quantity)?,
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Checkout {
            name,
            phone,
            address,
            whatsapp,
        } => {
            let form = hemline_storefront::CheckoutForm {
                name: name.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                address: address.unwrap_or_default(),
            };
            if whatsapp {
                commands::checkout::whatsapp(&ctx, &form)?;
            } else {
                commands::checkout::submit(&ctx, &form).await?;
            }
        }
        Commands::Login { email, password } => {
            commands::session::login(&ctx, &email, password.into()).await?;
        }
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show(&ctx),
            ThemeAction::Toggle => commands::theme::toggle(&ctx)?,
        },
        Commands::Admin { area } => run_admin(&ctx, area).await?,
    }
    Ok(())
}

async fn run_admin(ctx: &Context, area: AdminArea) -> Result<(), CliError> {
    use commands::admin;

    match area {
        AdminArea::Products { action } => match action {
            AdminProductsAction::Create(product) => admin::create_product(ctx, product.into()).await,
            AdminProductsAction::Update { id, product } => {
                admin::update_product(ctx, &id, product.into()).await
            }
            AdminProductsAction::Delete { id } => admin::delete_product(ctx, &id).await,
            AdminProductsAction::Upload { file } => admin::upload_image(ctx, &file).await,
        },
        AdminArea::Categories { action } => match action {
            AdminCategoriesAction::Create { name, description } => {
                admin::create_category(ctx, name, description).await
            }
            AdminCategoriesAction::Update {
                id,
                name,
                description,
            } => admin::update_category(ctx, &id, name, description).await,
            AdminCategoriesAction::Delete { id } => admin::delete_category(ctx, &id).await,
        },
        AdminArea::Orders { action } => match action {
            AdminOrdersAction::List { status, search } => {
                admin::list_orders(ctx, hemline_admin::OrderFilter { status, search }).await
            }
            AdminOrdersAction::Status { id, status } => admin::update_status(ctx, &id, status).await,
            AdminOrdersAction::Delete { id } => admin::delete_order(ctx, &id).await,
        },
        AdminArea::Dashboard => admin::dashboard(ctx).await,
    }
}

impl From<ProductArgs> for hemline_core::ProductInput {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            price: args.price,
            original_price: args.original_price,
            category: args.category,
            stock: args.stock,
            images: args.images,
            featured: args.featured,
            description: args.description,
            sizes: args.sizes,
        }
    }
}
