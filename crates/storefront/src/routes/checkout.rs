//! Checkout route handlers.
//!
//! The billing form posts either to `/checkout` (order without payment) or,
//! through the page script, to `/checkout/pay`, which answers with the
//! payment widget setup. The widget then calls back one of the payment
//! endpoints.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::billing::BillingDetails;
use crate::checkout::{
    CheckoutError, PaymentHandoff, begin_payment, cancel_payment, complete_payment, place_order,
};
use crate::error::Result;
use crate::render::CheckoutView;
use crate::state::AppState;

use super::{CART_UPDATED_EVENT, read_cart, update_cart};

/// How order times are shown on the confirmation page.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub summary: CheckoutView,
    pub details: BillingDetails,
    pub error: Option<String>,
    pub currency: String,
    pub cart_count: u64,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub message: String,
    pub total: String,
    pub placed_at: String,
    pub redirect_to: &'static str,
    pub cart_count: u64,
}

/// Payment callback form data.
#[derive(Debug, Deserialize)]
pub struct PaymentCallbackForm {
    #[serde(default)]
    pub reference: String,
}

/// Message for the page script to show after a payment callback.
#[derive(Debug, Serialize)]
pub struct PaymentOutcome {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
}

fn checkout_page(
    state: &AppState,
    summary: CheckoutView,
    details: BillingDetails,
    error: Option<String>,
) -> CheckoutTemplate {
    CheckoutTemplate {
        cart_count: summary.item_count,
        summary,
        details,
        error,
        currency: state.config().payment.currency.to_string(),
    }
}

/// Display the billing form and order summary.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let summary = read_cart(&state, &session, |store| CheckoutView::from(&store.persisted())).await?;
    Ok(checkout_page(&state, summary, BillingDetails::default(), None))
}

/// Place the order without a payment step.
///
/// Invalid billing details re-render the form with the first error; the
/// cart is left untouched.
#[instrument(skip(state, session, details))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    Form(details): Form<BillingDetails>,
) -> Result<Response> {
    let update = update_cart(&state, &session, |store| place_order(store, &details)).await?;

    match update.value {
        Ok(confirmation) => Ok((
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            ConfirmationTemplate {
                message: confirmation.message(),
                total: confirmation.total.display(),
                placed_at: confirmation.placed_at.format(TIMESTAMP_FORMAT).to_string(),
                redirect_to: confirmation.redirect_to,
                cart_count: 0,
            },
        )
            .into_response()),
        Err(CheckoutError::Billing(err)) => {
            tracing::debug!(error = %err, "Billing details rejected");
            let summary =
                read_cart(&state, &session, |store| CheckoutView::from(&store.persisted())).await?;
            let page = checkout_page(&state, summary, details, Some(err.to_string()));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Validate billing details and return the payment widget setup.
#[instrument(skip(state, session, details))]
pub async fn pay(
    State(state): State<AppState>,
    session: Session,
    Form(details): Form<BillingDetails>,
) -> Result<Json<PaymentHandoff>> {
    let handoff = read_cart(&state, &session, |store| {
        begin_payment(store, &details, &state.config().payment, state.gateway())
    })
    .await??;

    Ok(Json(handoff))
}

/// The widget reports a captured payment: clear the cart.
#[instrument(skip(state, session))]
pub async fn payment_success(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PaymentCallbackForm>,
) -> Result<Response> {
    let update = update_cart(&state, &session, |store| {
        complete_payment(store, &form.reference)
    })
    .await?;
    let receipt = update.value?;

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        Json(PaymentOutcome {
            message: receipt.message(),
            paid_at: Some(receipt.paid_at),
            redirect_to: Some(receipt.redirect_to),
        }),
    )
        .into_response())
}

/// The shopper closed the widget: keep the cart.
#[instrument(skip(state, session))]
pub async fn payment_cancel(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<PaymentOutcome>> {
    let message = read_cart(&state, &session, cancel_payment).await?;
    Ok(Json(PaymentOutcome {
        message: message.to_string(),
        paid_at: None,
        redirect_to: None,
    }))
}
