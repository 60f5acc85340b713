//! Shopping cart state, persistence, and the store that mutates it.
//!
//! # Modules
//!
//! - [`persistence`] - JSON snapshot of the cart in a [`KeyValueStorage`](crate::storage::KeyValueStorage)
//! - [`store`] - [`CartStore`], the only way to mutate a cart

pub mod persistence;
pub mod store;

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use cornershop_core::{Price, ProductId};

use crate::catalog::Product;

pub use persistence::{CART_STORAGE_KEY, CartRepository};
pub use store::{CartAction, CartChange, CartStore, parse_quantity};

/// One product in the cart and how many of it were requested.
///
/// Field names on the wire match the persisted snapshot format:
/// `{id, name, price, img, category, featured, rating, qty}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(rename = "img")]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: u8,
    #[serde(rename = "qty")]
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// A new row for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            featured: product.featured,
            rating: product.rating,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }
}

/// Ordered line items; insertion order is display order.
///
/// Holds at most one row per product id. Deserializing a snapshot that
/// repeats an id folds the later rows into the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rows in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The row for `id`, if any.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of unit price times quantity, unrounded.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Increment the row for `product`, or append one with quantity 1.
    pub(crate) fn increment(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(LineItem::from_product(product)),
        }
    }

    /// Overwrite the quantity of `id`. Returns `false` if there is no such row.
    pub(crate) fn set_quantity(&mut self, id: ProductId, quantity: NonZeroU32) -> bool {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .map(|item| item.quantity = quantity)
            .is_some()
    }

    /// Drop the row for `id`. Returns `false` if there was none.
    pub(crate) fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<LineItem>> for CartState {
    fn from(rows: Vec<LineItem>) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(rows.len());
        for row in rows {
            match items.iter_mut().find(|item| item.id == row.id) {
                Some(item) => item.quantity = item.quantity.saturating_add(row.quantity.get()),
                None => items.push(row),
            }
        }
        Self { items }
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}
