//! Corner Shop CLI - browse the catalog and drive a cart from the terminal.
//!
//! The cart snapshot is kept in a JSON file, in the same format the
//! storefront keeps in a visitor's session.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally in one category
//! cs-cli catalog --category electronics
//!
//! # Work with the cart
//! cs-cli cart add 3
//! cs-cli cart set 3 2
//! cs-cli cart show
//!
//! # Place the order
//! cs-cli checkout --name "Ann Lee" --email ann@example.com --address "12 Main St" --phone 08031234567
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products
//! - `cart show|add|set|remove|clear` - Inspect or change the cart
//! - `checkout` - Validate billing details and place the order

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Corner Shop CLI tools")]
struct Cli {
    /// File the cart snapshot is stored in
    #[arg(long, global = true, default_value = commands::DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Product catalog JSON file
    #[arg(long, global = true, default_value = commands::DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Catalog {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Validate billing details and place the order
    Checkout {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        address: String,

        #[arg(short, long)]
        phone: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,
    },
    /// Set the quantity of a product (no leading positive integer removes it)
    Set {
        /// Product ID
        id: String,
        /// New quantity
        quantity: String,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cornershop_cli=info,cornershop_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, commands::CliError> {
    let mut ctx = Context::open(&cli.catalog, &cli.store)?;

    let output = match cli.command {
        Commands::Catalog { category } => commands::catalog::list(&ctx, category.as_deref()),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&mut ctx),
            CartAction::Add { id } => commands::cart::add(&mut ctx, &id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&mut ctx, &id, &quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id)?,
            CartAction::Clear => commands::cart::clear(&mut ctx),
        },
        Commands::Checkout {
            name,
            email,
            address,
            phone,
        } => commands::checkout::place(
            &mut ctx,
            &commands::checkout::billing(name, email, address, phone),
        )?,
    };

    Ok(output)
}
