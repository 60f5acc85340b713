//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::render::HomeView;
use crate::state::AppState;

use super::read_cart;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: HomeView,
    pub cart_count: u64,
}

/// Display the home page: one tile per category plus featured products.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart_count = read_cart(&state, &session, |store| store.total_item_count()).await?;
    Ok(HomeTemplate {
        view: HomeView::build(state.catalog()),
        cart_count,
    })
}
