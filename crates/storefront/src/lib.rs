//! Corner Shop storefront library.
//!
//! Catalog browsing, a session-persisted shopping cart, billing validation,
//! and checkout through an inline payment widget. The binary in `main.rs`
//! wires these into an axum server; the library is reused by the CLI and
//! the integration tests.
//!
//! # Modules
//!
//! - [`catalog`] - Product records and the read-only catalog
//! - [`cart`] - Cart state, its JSON snapshot, and [`cart::CartStore`]
//! - [`storage`] - Key-value backends the cart snapshot is written to
//! - [`billing`] - Billing form validation
//! - [`checkout`] - Order placement and payment hand-off
//! - [`render`] - View models for templates
//! - [`routes`] - HTTP handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod billing;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod state;
pub mod storage;

use axum::{Router, extract::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the application router with its session, request ID, and trace
/// layers. Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
