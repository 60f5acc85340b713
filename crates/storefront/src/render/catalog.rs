//! Catalog views: product listing, category sidebar, home page.

use crate::catalog::{Catalog, Product};

/// Pseudo-category selecting every product.
pub const ALL_CATEGORIES: &str = "all";

/// Highest rating rendered as stars.
const MAX_STARS: u8 = 5;

/// Uppercase the first character.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Rating as a row of star glyphs.
#[must_use]
pub fn stars(rating: u8) -> String {
    "⭐".repeat(usize::from(rating.min(MAX_STARS)))
}

/// One product tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub stars: String,
    pub category: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            stars: stars(product.rating),
            category: product.category.clone(),
        }
    }
}

/// One entry in the category sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLinkView {
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// Product listing with its category sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub selected: String,
    pub categories: Vec<CategoryLinkView>,
    pub products: Vec<ProductCardView>,
}

impl CatalogView {
    /// Listing for `requested`; unknown or missing categories show everything.
    pub fn build<C: Catalog + ?Sized>(catalog: &C, requested: Option<&str>) -> Self {
        let selected = requested
            .filter(|c| *c != ALL_CATEGORIES && catalog.has_category(c))
            .unwrap_or(ALL_CATEGORIES);

        let products = catalog
            .products()
            .iter()
            .filter(|p| selected == ALL_CATEGORIES || p.category == selected)
            .map(ProductCardView::from)
            .collect();

        let categories = std::iter::once(ALL_CATEGORIES)
            .chain(catalog.categories())
            .map(|slug| CategoryLinkView {
                slug: slug.to_string(),
                label: if slug == ALL_CATEGORIES {
                    "All".to_string()
                } else {
                    capitalize(slug)
                },
                active: slug == selected,
            })
            .collect();

        Self {
            selected: selected.to_string(),
            categories,
            products,
        }
    }
}

/// A category tile on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTileView {
    pub slug: String,
    pub label: String,
    pub image: String,
}

/// Home page: category tiles and featured products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub categories: Vec<CategoryTileView>,
    pub featured: Vec<ProductCardView>,
}

impl HomeView {
    pub fn build<C: Catalog + ?Sized>(catalog: &C) -> Self {
        let categories = catalog
            .categories()
            .into_iter()
            .map(|slug| CategoryTileView {
                slug: slug.to_string(),
                label: capitalize(slug),
                image: format!("images/{slug}.jpg"),
            })
            .collect();

        let featured = catalog
            .products()
            .iter()
            .filter(|p| p.featured)
            .map(ProductCardView::from)
            .collect();

        Self {
            categories,
            featured,
        }
    }
}
