//! Pure view builders.
//!
//! Each function turns a catalog or cart state into a plain struct that
//! an askama template renders. Nothing here reads storage or mutates state.

pub mod cart;
pub mod catalog;

pub use cart::{CartItemView, CartView, CheckoutLineView, CheckoutView};
pub use catalog::{
    ALL_CATEGORIES, CatalogView, CategoryLinkView, CategoryTileView, HomeView, ProductCardView,
    capitalize, stars,
};
