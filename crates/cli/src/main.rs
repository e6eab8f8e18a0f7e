//! Yogurt Shop CLI - Catalog inspection and scripted checkout.
//!
//! # Usage
//!
//! ```bash
//! # Print the built-in catalog
//! ys-cli catalog list
//!
//! # Print a catalog file as JSON
//! ys-cli catalog list --catalog catalog.json --json
//!
//! # Check a catalog file for invalid or duplicate ids
//! ys-cli catalog validate catalog.json
//!
//! # Run a checkout: two natural, one strawberry, then one natural back
//! ys-cli checkout add:1 add:1 add:2 dec:1
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Print products and prices
//! - `catalog validate` - Load and validate a catalog file
//! - `checkout` - Apply cart operations to a fresh cart and print the receipt
//!
//! When `--catalog` is omitted, `STOREFRONT_CATALOG_PATH` (also read from
//! `.env`) is used, falling back to the built-in catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::checkout::CartOp;

#[derive(Parser)]
#[command(name = "ys-cli")]
#[command(author, version, about = "Yogurt Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect product catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Apply cart operations to a fresh cart and check out
    Checkout {
        /// Catalog JSON file (defaults to the built-in catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Operations applied in order: `add:ID`, `inc:ID` or `dec:ID`
        #[arg(required = true)]
        ops: Vec<CartOp>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print the catalog
    List {
        /// Catalog JSON file (defaults to the built-in catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Load and validate a catalog file
    Validate {
        /// Catalog JSON file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info so warnings and summaries show without RUST_LOG
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { catalog, json } => {
                commands::catalog::list(catalog, json).await?;
            }
            CatalogAction::Validate { file } => commands::catalog::validate(&file).await?,
        },
        Commands::Checkout { catalog, ops } => commands::checkout::run(catalog, &ops).await?,
    }
    Ok(())
}
