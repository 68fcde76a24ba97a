//! Clementine admin CLI - terminal surface for the store dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Aggregate metrics over all orders
//! clem-admin metrics
//!
//! # List orders, optionally filtered by status
//! clem-admin orders list --status pending
//!
//! # Change an order's delivery status (prompts for confirmation)
//! clem-admin orders set-status <order-id> dispatch
//!
//! # Delete an order or product (prompts for confirmation)
//! clem-admin orders delete <order-id>
//! clem-admin products delete <product-id>
//!
//! # Inspect and edit products
//! clem-admin products list
//! clem-admin products show <product-id>
//! clem-admin products edit <product-id> --price 49.90 --image ./stool.png
//! ```
//!
//! Pass `--yes` to answer every confirmation prompt affirmatively
//! (for scripted use).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Args, Parser, Subcommand};
use clementine_core::{OrderId, OrderStatus, ProductId, StatusFilter};
use clementine_dashboard::assets::AssetUrlResolver;
use clementine_dashboard::config::DashboardConfig;
use clementine_dashboard::store::StoreClient;
use clementine_dashboard::{Dashboard, Session};
use rust_decimal::Decimal;

mod commands;
mod prompt;

use prompt::TermPrompt;

type AdminDashboard = Dashboard<StoreClient, TermPrompt>;

#[derive(Parser)]
#[command(name = "clem-admin")]
#[command(author, version, about = "Admin tools for the Clementine store")]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show aggregate metrics over all orders
    Metrics,
    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Inspect and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List {
        /// Only show orders with this status (all, pending, dispatch, success)
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Change an order's delivery status
    SetStatus {
        /// Order document id
        id: OrderId,
        /// New status (pending, dispatch, success)
        status: OrderStatus,
    },
    /// Delete an order
    Delete {
        /// Order document id
        id: OrderId,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List,
    /// Show one product in detail
    Show {
        /// Product document id
        id: ProductId,
    },
    /// Edit product fields (only the given fields are changed)
    Edit {
        /// Product document id
        id: ProductId,

        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete a product
    Delete {
        /// Product document id
        id: ProductId,
    },
}

#[derive(Args)]
struct EditFields {
    /// New product name
    #[arg(long)]
    name: Option<String>,

    /// New product description
    #[arg(long)]
    description: Option<String>,

    /// New price
    #[arg(long)]
    price: Option<Decimal>,

    /// New stock quantity
    #[arg(long)]
    stock: Option<i64>,

    /// Path to an image file to upload and attach
    #[arg(long)]
    image: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    let resolver = AssetUrlResolver::from_config(&config);
    let store = StoreClient::new(&config);
    let prompt = TermPrompt::new(cli.yes);

    // The CLI runs with the operator's API token, so the session is
    // authenticated by construction.
    let mut dashboard: AdminDashboard = Dashboard::new(store, prompt, &Session::authenticated())?;

    match cli.command {
        Commands::Metrics => commands::metrics::show(&mut dashboard).await?,
        Commands::Orders { action } => match action {
            OrderAction::List { status } => {
                commands::orders::list(&mut dashboard, status).await?;
            }
            OrderAction::SetStatus { id, status } => {
                commands::orders::set_status(&mut dashboard, &id, status).await?;
            }
            OrderAction::Delete { id } => commands::orders::delete(&mut dashboard, &id).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&mut dashboard).await?,
            ProductAction::Show { id } => {
                commands::products::show(&mut dashboard, &resolver, &id).await?;
            }
            ProductAction::Edit { id, fields } => {
                commands::products::edit(&mut dashboard, &id, fields).await?;
            }
            ProductAction::Delete { id } => {
                commands::products::delete(&mut dashboard, &id).await?;
            }
        },
    }
    Ok(())
}
