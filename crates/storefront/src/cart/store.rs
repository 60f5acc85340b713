//! The cart store.
//!
//! [`CartStore`] owns the in-memory [`CartState`] and guarantees that after
//! every mutating call returns, the persisted snapshot matches it. Each
//! mutation is followed by a full snapshot overwrite and a notification
//! to subscribed observers (the item-count badge, in practice).
//!
//! No operation fails. Unknown product ids are ignored, and a quantity
//! that is not a positive integer removes the row.

use std::num::NonZeroU32;

use cornershop_core::{Price, ProductId};

use crate::catalog::Catalog;
use crate::error::add_breadcrumb;
use crate::storage::KeyValueStorage;

use super::{CartRepository, CartState};

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Added(ProductId),
    QuantitySet(ProductId, NonZeroU32),
    Removed(ProductId),
    Cleared,
}

/// Notification sent to observers after a mutation is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChange {
    pub action: CartAction,
    /// Total quantity across all rows after the mutation.
    pub item_count: u64,
}

type Observer = Box<dyn Fn(&CartChange) + Send>;

/// Parse a quantity typed by a shopper.
///
/// Reads the leading base-10 integer after trimming and an optional sign,
/// ignoring whatever follows it, so `"2.5"` and `"3abc"` read as 2 and 3.
/// Returns `None` when there are no leading digits or the value is below 1.
/// Values too large for a `u32` saturate.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<NonZeroU32> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut digits = unsigned.bytes().take_while(u8::is_ascii_digit).peekable();
    digits.peek()?;
    let value = digits.fold(0_u32, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
    });

    if negative {
        return None;
    }
    NonZeroU32::new(value)
}

/// Cart operations over a storage backend and a product catalog.
pub struct CartStore<'c, S, C: ?Sized> {
    repository: CartRepository<S>,
    catalog: &'c C,
    state: CartState,
    observers: Vec<Observer>,
}

impl<'c, S, C> CartStore<'c, S, C>
where
    S: KeyValueStorage,
    C: Catalog + ?Sized,
{
    /// Open a store, hydrating its state from `storage`.
    pub fn open(storage: S, catalog: &'c C) -> Self {
        let repository = CartRepository::new(storage);
        let state = repository.load();
        Self {
            repository,
            catalog,
            state,
            observers: Vec::new(),
        }
    }

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&CartChange) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current in-memory state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// State as currently persisted.
    #[must_use]
    pub fn persisted(&self) -> CartState {
        self.repository.load()
    }

    /// Add one unit of `id`.
    ///
    /// Products missing from the catalog are ignored: nothing is persisted
    /// and no observer is notified.
    pub fn add(&mut self, id: ProductId) {
        let Some(product) = self.catalog.find(id) else {
            tracing::debug!(product_id = %id, "Ignoring add of unknown product");
            return;
        };

        self.state.increment(product);
        self.commit(CartAction::Added(id));
    }

    /// Set the quantity of `id` from shopper input.
    ///
    /// Input that is not a positive integer behaves exactly like
    /// [`remove`](Self::remove).
    pub fn set_quantity(&mut self, id: ProductId, raw: &str) {
        match parse_quantity(raw) {
            Some(quantity) => self.set_quantity_to(id, quantity),
            None => {
                tracing::debug!(product_id = %id, input = raw, "Invalid quantity, removing row");
                self.remove(id);
            }
        }
    }

    /// Set the quantity of `id` to an already-validated value.
    pub fn set_quantity_to(&mut self, id: ProductId, quantity: NonZeroU32) {
        if !self.state.set_quantity(id, quantity) {
            tracing::debug!(product_id = %id, "Quantity update for product not in cart");
        }
        self.commit(CartAction::QuantitySet(id, quantity));
    }

    /// Remove `id` from the cart. Absent ids are not an error.
    pub fn remove(&mut self, id: ProductId) {
        self.state.remove(id);
        self.commit(CartAction::Removed(id));
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.state.clear();
        self.commit(CartAction::Cleared);
    }

    /// Total quantity, read from the persisted snapshot.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.repository.load().item_count()
    }

    /// Total price, read from the persisted snapshot and left unrounded.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.repository.load().total()
    }

    /// The raw persisted snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.repository.snapshot()
    }

    /// Close the store and give back its storage backend.
    pub fn into_storage(self) -> S {
        self.repository.into_storage()
    }

    fn commit(&mut self, action: CartAction) {
        if let Err(e) = self.repository.save(&self.state) {
            tracing::error!(error = %e, ?action, "Failed to persist cart");
        }

        let change = CartChange {
            action,
            item_count: self.state.item_count(),
        };

        add_breadcrumb("cart", &format!("{action:?}"), None);

        for observer in &self.observers {
            observer(&change);
        }
    }
}
