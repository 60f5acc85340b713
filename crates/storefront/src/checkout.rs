//! Checkout and payment orchestration.
//!
//! Two paths end a shopping session:
//!
//! - [`place_order`] validates billing details, then clears the cart as if
//!   the order went through, with no payment step.
//! - [`begin_payment`] validates billing details, totals the persisted cart,
//!   and hands the amount to a [`PaymentGateway`]. Control then returns to
//!   the shopper's browser; later, exactly one of [`complete_payment`] or
//!   [`cancel_payment`] runs.
//!
//! Any validation failure aborts before the cart or its snapshot is touched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use cornershop_core::{CurrencyCode, Email, Price};

use crate::billing::{BillingDetails, BillingError};
use crate::catalog::Catalog;
use crate::cart::CartStore;
use crate::config::PaymentConfig;
use crate::storage::KeyValueStorage;

/// Where the shopper is sent after a completed checkout.
pub const LANDING_PAGE: &str = "/";

/// Errors raised by the payment collaborator.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The cart total cannot be expressed in minor units.
    #[error("cart total {0} is out of range for payment")]
    AmountOutOfRange(Price),

    /// The gateway refused to start a payment.
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Why a checkout step was aborted.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// A payment was requested with blank billing fields.
    #[error("Please fill in all billing details before proceeding to payment.")]
    IncompleteBilling,

    #[error("Your cart is empty!")]
    EmptyCart,

    #[error("payment reference missing")]
    MissingReference,

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// What the payment collaborator needs to open its widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Publishable (browser-safe) gateway key.
    pub key: String,
    pub email: Email,
    /// Amount in minor currency units (kobo, cents).
    pub amount: i64,
    pub currency: CurrencyCode,
}

/// Widget configuration returned to the browser.
///
/// The browser opens the hosted widget with these values and reports back
/// through `callback_url` (with a reference) or `cancel_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentHandoff {
    pub provider: &'static str,
    pub key: String,
    pub email: String,
    pub amount: i64,
    pub currency: CurrencyCode,
    pub callback_url: String,
    pub cancel_url: String,
}

/// A hosted payment service.
///
/// Opening a payment never completes it: the outcome arrives later through
/// the success or cancel callback.
pub trait PaymentGateway {
    /// Prepare the hosted widget for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot start a payment.
    fn open(&self, request: PaymentRequest) -> Result<PaymentHandoff, PaymentError>;
}

/// Paystack's inline (popup) widget.
///
/// The widget runs entirely in the browser, so opening a payment only
/// assembles its setup options.
#[derive(Debug, Clone)]
pub struct InlineWidgetGateway {
    callback_url: String,
    cancel_url: String,
}

impl InlineWidgetGateway {
    /// Paths the widget reports back to.
    #[must_use]
    pub fn new(callback_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            callback_url: callback_url.into(),
            cancel_url: cancel_url.into(),
        }
    }
}

impl PaymentGateway for InlineWidgetGateway {
    fn open(&self, request: PaymentRequest) -> Result<PaymentHandoff, PaymentError> {
        Ok(PaymentHandoff {
            provider: "paystack",
            key: request.key,
            email: request.email.into_inner(),
            amount: request.amount,
            currency: request.currency,
            callback_url: self.callback_url.clone(),
            cancel_url: self.cancel_url.clone(),
        })
    }
}

/// Result of a checkout that did not go through a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub customer_name: String,
    pub email: Email,
    pub total: Price,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
    pub redirect_to: &'static str,
}

impl OrderConfirmation {
    /// Message shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Thank you, {}! Your order has been placed.",
            self.customer_name
        )
    }
}

/// Result of a successful payment callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub reference: String,
    pub total: Price,
    pub paid_at: DateTime<Utc>,
    pub redirect_to: &'static str,
}

impl PaymentReceipt {
    /// Message shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Payment successful! Reference: {}", self.reference)
    }
}

/// Validate billing details and place the order without payment.
///
/// # Errors
///
/// Returns [`CheckoutError::Billing`] if a field is invalid; the cart is
/// left untouched.
pub fn place_order<S, C>(
    store: &mut CartStore<'_, S, C>,
    details: &BillingDetails,
) -> Result<OrderConfirmation, CheckoutError>
where
    S: KeyValueStorage,
    C: Catalog + ?Sized,
{
    let billing = details.validate()?;

    let cart = store.persisted();
    let confirmation = OrderConfirmation {
        customer_name: billing.name,
        email: billing.email,
        total: cart.total(),
        item_count: cart.item_count(),
        placed_at: Utc::now(),
        redirect_to: LANDING_PAGE,
    };

    store.clear();
    tracing::info!(
        items = confirmation.item_count,
        total = %confirmation.total,
        "Order placed"
    );
    Ok(confirmation)
}

/// Validate billing details and hand the cart total to the gateway.
///
/// The cart is not modified; it is cleared only when the success callback
/// arrives.
///
/// # Errors
///
/// Returns an error if billing details are invalid, the cart is empty, or
/// the gateway cannot start the payment.
pub fn begin_payment<S, C, G>(
    store: &CartStore<'_, S, C>,
    details: &BillingDetails,
    config: &PaymentConfig,
    gateway: &G,
) -> Result<PaymentHandoff, CheckoutError>
where
    S: KeyValueStorage,
    C: Catalog + ?Sized,
    G: PaymentGateway + ?Sized,
{
    let billing = details.validate().map_err(|err| match err {
        BillingError::MissingFields => CheckoutError::IncompleteBilling,
        other => CheckoutError::Billing(other),
    })?;

    let cart = store.persisted();
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let total = cart.total();
    let amount = total
        .to_minor_units()
        .ok_or(PaymentError::AmountOutOfRange(total))?;

    let handoff = gateway.open(PaymentRequest {
        key: config.public_key.clone(),
        email: billing.email,
        amount,
        currency: config.currency,
    })?;

    tracing::info!(amount, currency = %config.currency, "Payment handed off to gateway");
    Ok(handoff)
}

/// Success callback: the gateway captured the payment.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingReference`] if `reference` is blank; the
/// cart is left untouched.
pub fn complete_payment<S, C>(
    store: &mut CartStore<'_, S, C>,
    reference: &str,
) -> Result<PaymentReceipt, CheckoutError>
where
    S: KeyValueStorage,
    C: Catalog + ?Sized,
{
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(CheckoutError::MissingReference);
    }

    let total = store.total_price();
    store.clear();
    tracing::info!(reference, total = %total, "Payment completed");

    Ok(PaymentReceipt {
        reference: reference.to_string(),
        total,
        paid_at: Utc::now(),
        redirect_to: LANDING_PAGE,
    })
}

/// Cancel callback: the shopper closed the widget. The cart stays as is.
pub fn cancel_payment<S, C>(store: &CartStore<'_, S, C>) -> &'static str
where
    S: KeyValueStorage,
    C: Catalog + ?Sized,
{
    tracing::info!(items = store.total_item_count(), "Payment window closed");
    "Payment window closed."
}
