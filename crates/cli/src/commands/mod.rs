//! CLI command implementations.
//!
//! Each command returns the text to print so it can be tested without
//! capturing stdout.

pub mod cart;
pub mod catalog;
pub mod checkout;

use std::path::Path;

use thiserror::Error;

use cornershop_core::ProductId;
use cornershop_storefront::cart::CartStore;
use cornershop_storefront::catalog::{CatalogError, StaticCatalog};
use cornershop_storefront::checkout::CheckoutError;
use cornershop_storefront::storage::{FileStorage, StorageError};

/// Default cart snapshot file.
pub const DEFAULT_STORE_PATH: &str = ".cornershop/storage.json";

/// Default product catalog.
pub const DEFAULT_CATALOG_PATH: &str = "crates/storefront/catalog/products.json";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The store file could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Checkout was rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A product ID argument was not a number.
    #[error("Invalid product ID: {0}")]
    InvalidProductId(String),
}

/// Catalog and cart storage shared by all commands.
pub struct Context {
    pub catalog: StaticCatalog,
    pub storage: FileStorage,
}

impl Context {
    /// Load the catalog and open the store file.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or the store file
    /// cannot be opened.
    pub fn open(catalog: &Path, store: &Path) -> Result<Self, CliError> {
        Ok(Self {
            catalog: StaticCatalog::load(catalog)?,
            storage: FileStorage::open(store)?,
        })
    }

    /// Open a cart store that logs each change.
    pub fn cart(&mut self) -> CartStore<'_, &mut FileStorage, StaticCatalog> {
        let mut store = CartStore::open(&mut self.storage, &self.catalog);
        store.subscribe(|change| {
            tracing::info!(action = ?change.action, items = change.item_count, "Cart updated");
        });
        store
    }
}

fn parse_id(raw: &str) -> Result<ProductId, CliError> {
    raw.parse()
        .map_err(|_| CliError::InvalidProductId(raw.to_string()))
}
