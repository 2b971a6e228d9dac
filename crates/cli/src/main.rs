//! Seller Pro CLI - local product store management.
//!
//! # Usage
//!
//! ```bash
//! # Create the product tables
//! seller-pro db init
//!
//! # Load the sample catalog, plus 20 generated products
//! seller-pro db seed --random 20 --keyword headphones
//!
//! # Link a product to a seller and list their portfolio
//! seller-pro portfolio link -e seller@example.com -p 1003
//! seller-pro portfolio list -e seller@example.com
//!
//! # Add a brand new product to a seller's portfolio
//! seller-pro portfolio add -e seller@example.com -n "Desk Lamp" --price 12.5 -c "Home & Garden"
//! ```
//!
//! The database comes from `DASHBOARD_DATABASE_URL` (or `DATABASE_URL`),
//! the same variable the dashboard reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "seller-pro")]
#[command(author, version, about = "Seller Pro CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local product store
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    /// Manage a seller's saved products
    Portfolio {
        #[command(subcommand)]
        action: PortfolioAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Create the product tables if they do not exist
    Init,
    /// Load the sample catalog into the store
    Seed {
        /// Also generate this many random products
        #[arg(short, long, default_value_t = 0)]
        random: u32,

        /// Keyword used to name generated products
        #[arg(short, long, default_value = "product")]
        keyword: String,
    },
}

#[derive(Subcommand)]
enum PortfolioAction {
    /// Link an existing product to a seller
    Link {
        /// Seller email address
        #[arg(short, long)]
        email: String,

        /// Product id
        #[arg(short, long)]
        product_id: i32,
    },
    /// Create a product and link it to a seller
    Add {
        /// Seller email address
        #[arg(short, long)]
        email: String,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product price
        #[arg(long)]
        price: f64,

        /// Category (Electronics, Fashion, Home & Garden)
        #[arg(short, long, default_value = "Electronics")]
        category: String,
    },
    /// List a seller's saved products
    List {
        /// Seller email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seller_pro_cli=info,seller_pro_dashboard=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Db { action } => match action {
            DbAction::Init => commands::db::init().await?,
            DbAction::Seed { random, keyword } => {
                commands::db::seed(random, &keyword).await?;
            }
        },
        Commands::Portfolio { action } => match action {
            PortfolioAction::Link { email, product_id } => {
                commands::portfolio::link(&email, product_id).await?;
            }
            PortfolioAction::Add {
                email,
                name,
                price,
                category,
            } => {
                commands::portfolio::add(&email, name, price, &category).await?;
            }
            PortfolioAction::List { email } => commands::portfolio::list(&email).await?,
        },
    }
    Ok(())
}
