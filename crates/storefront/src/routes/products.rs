//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::render::CatalogView;
use crate::state::AppState;

use super::read_cart;

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub view: CatalogView,
    pub cart_count: u64,
}

/// Display the product listing, optionally filtered to one category.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse> {
    let cart_count = read_cart(&state, &session, |store| store.total_item_count()).await?;
    Ok(ProductsIndexTemplate {
        view: CatalogView::build(state.catalog(), query.category.as_deref()),
        cart_count,
    })
}
