//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart snapshot lives in the visitor's session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use cornershop_core::ProductId;

use crate::error::{AppError, Result};
use crate::render::CartView;
use crate::state::AppState;

use super::{CART_UPDATED_EVENT, CartUpdate, read_cart, update_cart};

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
///
/// `quantity` is kept as typed; input without a leading positive integer
/// removes the row.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    #[serde(default)]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u64,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid product id: {raw}")))
}

/// Attach the `cart-updated` trigger when the cart actually changed.
fn with_trigger<T: IntoResponse>(update: CartUpdate<T>) -> Response {
    if update.change.is_some() {
        (
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            update.value,
        )
            .into_response()
    } else {
        update.value.into_response()
    }
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = read_cart(&state, &session, |store| CartView::from(store.state())).await?;
    Ok(CartShowTemplate {
        cart_count: cart.item_count,
        cart,
    })
}

/// Add one unit of a product to the cart (HTMX).
///
/// Returns the count badge with an HTMX trigger so other elements refresh.
/// Unknown products leave the cart untouched and fire no trigger.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;

    let update = update_cart(&state, &session, |store| {
        store.add(id);
        CartCountTemplate {
            count: store.total_item_count(),
        }
    })
    .await?;

    Ok(with_trigger(update))
}

/// Update cart item quantity (HTMX).
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;

    let update = update_cart(&state, &session, |store| {
        store.set_quantity(id, &form.quantity);
        CartItemsTemplate {
            cart: CartView::from(store.state()),
        }
    })
    .await?;

    Ok(with_trigger(update))
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;

    let update = update_cart(&state, &session, |store| {
        store.remove(id);
        CartItemsTemplate {
            cart: CartView::from(store.state()),
        }
    })
    .await?;

    Ok(with_trigger(update))
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    let update = update_cart(&state, &session, |store| {
        store.clear();
        CartItemsTemplate {
            cart: CartView::from(store.state()),
        }
    })
    .await?;

    Ok(with_trigger(update))
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let count = read_cart(&state, &session, |store| store.total_item_count()).await?;
    Ok(CartCountTemplate { count })
}
