//! Cart and checkout views.

use crate::cart::{CartState, LineItem};

/// One row on the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity.get(),
            price: item.unit_price.display(),
            line_price: item.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}

/// One row in the checkout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineView {
    pub image: String,
    /// `"<name> x <quantity>"`.
    pub label: String,
    pub line_total: String,
}

/// Order summary beside the billing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    pub lines: Vec<CheckoutLineView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&CartState> for CheckoutView {
    fn from(cart: &CartState) -> Self {
        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| CheckoutLineView {
                    image: item.image.clone(),
                    label: format!("{} x {}", item.name, item.quantity),
                    line_total: item.line_total().display(),
                })
                .collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}
