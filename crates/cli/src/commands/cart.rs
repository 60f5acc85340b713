//! Cart commands.

use std::fmt::Write;

use cornershop_storefront::catalog::Catalog;
use cornershop_storefront::render::CartView;

use super::{CliError, Context, parse_id};

/// Render the persisted cart as a table with totals.
pub fn show(ctx: &mut Context) -> String {
    let store = ctx.cart();
    let view = CartView::from(&store.persisted());

    if view.items.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for item in &view.items {
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:>3} x {:>10} = {:>10}",
            item.id, item.name, item.quantity, item.price, item.line_price
        );
    }
    let _ = write!(
        out,
        "Items: {}  Total: {}",
        store.total_item_count(),
        store.total_price().display()
    );
    out
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if `id` is not a number.
pub fn add(ctx: &mut Context, id: &str) -> Result<String, CliError> {
    let id = parse_id(id)?;
    if ctx.catalog.find(id).is_none() {
        return Ok(format!("No product with ID {id}."));
    }

    let mut store = ctx.cart();
    store.add(id);
    Ok(format!("Added to cart! Items: {}", store.total_item_count()))
}

/// Set a product's quantity from raw input.
///
/// # Errors
///
/// Returns an error if `id` is not a number.
pub fn set(ctx: &mut Context, id: &str, quantity: &str) -> Result<String, CliError> {
    let id = parse_id(id)?;
    let mut store = ctx.cart();
    store.set_quantity(id, quantity);
    Ok(format!("Items: {}", store.total_item_count()))
}

/// Remove a product.
///
/// # Errors
///
/// Returns an error if `id` is not a number.
pub fn remove(ctx: &mut Context, id: &str) -> Result<String, CliError> {
    let id = parse_id(id)?;
    let mut store = ctx.cart();
    store.remove(id);
    Ok(format!("Items: {}", store.total_item_count()))
}

/// Empty the cart.
pub fn clear(ctx: &mut Context) -> String {
    ctx.cart().clear();
    "Cart cleared.".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::tests::context;

    #[test]
    fn test_add_and_show() {
        let (_dir, mut ctx) = context();
        add(&mut ctx, "1").unwrap();
        add(&mut ctx, "1").unwrap();
        add(&mut ctx, "2").unwrap();

        let out = show(&mut ctx);
        assert!(out.contains("Headphones"));
        assert!(out.ends_with("Items: 3  Total: $199.98"));
    }

    #[test]
    fn test_add_unknown_product() {
        let (_dir, mut ctx) = context();
        assert_eq!(add(&mut ctx, "99").unwrap(), "No product with ID 99.");
        assert_eq!(show(&mut ctx), "Your cart is empty.");
    }

    #[test]
    fn test_set_invalid_quantity_removes() {
        let (_dir, mut ctx) = context();
        add(&mut ctx, "1").unwrap();
        add(&mut ctx, "2").unwrap();
        assert_eq!(set(&mut ctx, "1", "4").unwrap(), "Items: 5");
        assert_eq!(set(&mut ctx, "1", "zero").unwrap(), "Items: 1");
    }

    #[test]
    fn test_remove_and_clear() {
        let (_dir, mut ctx) = context();
        add(&mut ctx, "1").unwrap();
        add(&mut ctx, "2").unwrap();
        assert_eq!(remove(&mut ctx, "2").unwrap(), "Items: 1");
        assert_eq!(clear(&mut ctx), "Cart cleared.");
        assert_eq!(show(&mut ctx), "Your cart is empty.");
    }

    #[test]
    fn test_cart_survives_reopen() {
        let (dir, mut ctx) = context();
        add(&mut ctx, "2").unwrap();
        drop(ctx);

        let mut reopened = crate::commands::Context::open(
            &dir.path().join("products.json"),
            &dir.path().join("storage.json"),
        )
        .unwrap();
        assert!(show(&mut reopened).ends_with("Items: 1  Total: $80.00"));
    }
}
