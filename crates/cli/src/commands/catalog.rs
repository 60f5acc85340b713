//! Catalog listing.

use std::fmt::Write;

use cornershop_storefront::render::CatalogView;

use super::Context;

/// List products in `category`, or everything if it is missing or unknown.
pub fn list(ctx: &Context, category: Option<&str>) -> String {
    let view = CatalogView::build(&ctx.catalog, category);

    let mut out = String::new();
    let _ = writeln!(out, "Category: {}", view.selected);
    for product in &view.products {
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:>10}  {}",
            product.id, product.name, product.price, product.stars
        );
    }
    if view.products.is_empty() {
        out.push_str("No products found.\n");
    }
    out.trim_end().to_string()
}
