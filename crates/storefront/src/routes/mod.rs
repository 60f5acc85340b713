//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (category tiles, featured products)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (?category=<slug>)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (returns count badge, triggers cart-updated)
//! POST /cart/update            - Set quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout                   - Billing form and order summary
//! POST /checkout                   - Place order without payment
//! POST /checkout/pay               - Validate billing, return payment widget setup (JSON)
//! POST /checkout/payment/success   - Payment captured (JSON)
//! POST /checkout/payment/cancel    - Payment window closed (JSON)
//! ```
//!
//! Every request that touches the cart loads the session's snapshot into a
//! [`SessionStorage`], runs one synchronous [`CartStore`] operation over
//! it, and flushes changed keys back before responding.

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::cart::{CART_STORAGE_KEY, CartChange, CartStore};
use crate::catalog::StaticCatalog;
use crate::error::Result;
use crate::state::{AppState, PAYMENT_CANCEL_PATH, PAYMENT_SUCCESS_PATH};
use crate::storage::SessionStorage;

/// HTMX event fired whenever the cart changes.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// A cart store over one request's session snapshot.
pub type SessionCart<'c> = CartStore<'c, SessionStorage, StaticCatalog>;

/// Result of a cart mutation made during a request.
pub struct CartUpdate<T> {
    pub value: T,
    /// Last change observed, if the operation committed anything.
    pub change: Option<CartChange>,
}

/// Run a read-only operation against the session's cart.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn read_cart<T>(
    state: &AppState,
    session: &Session,
    f: impl FnOnce(&SessionCart<'_>) -> T,
) -> Result<T> {
    let storage = SessionStorage::load(session, &[CART_STORAGE_KEY]).await?;
    let store = CartStore::open(storage, state.catalog());
    Ok(f(&store))
}

/// Run a mutating operation against the session's cart and persist it.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn update_cart<T>(
    state: &AppState,
    session: &Session,
    f: impl FnOnce(&mut SessionCart<'_>) -> T,
) -> Result<CartUpdate<T>> {
    let storage = SessionStorage::load(session, &[CART_STORAGE_KEY]).await?;
    let last_change = Arc::new(Mutex::new(None));

    let (value, storage) = {
        let mut store = CartStore::open(storage, state.catalog());
        let sink = Arc::clone(&last_change);
        store.subscribe(move |change| {
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(*change);
        });
        let value = f(&mut store);
        (value, store.into_storage())
    };

    storage.flush().await?;

    let change = *last_change.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(CartUpdate { value, change })
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    let success = PAYMENT_SUCCESS_PATH.trim_start_matches("/checkout");
    let cancel = PAYMENT_CANCEL_PATH.trim_start_matches("/checkout");

    Router::new()
        .route("/", get(checkout::show).post(checkout::place))
        .route("/pay", post(checkout::pay))
        .route(success, post(checkout::payment_success))
        .route(cancel, post(checkout::payment_cancel))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}
