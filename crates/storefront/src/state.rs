//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::StaticCatalog;
use crate::checkout::InlineWidgetGateway;
use crate::config::StorefrontConfig;

/// Path the payment widget reports a captured payment to.
pub const PAYMENT_SUCCESS_PATH: &str = "/checkout/payment/success";

/// Path the payment widget reports a closed window to.
pub const PAYMENT_CANCEL_PATH: &str = "/checkout/payment/cancel";

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid callback url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, configuration, and payment gateway.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: StaticCatalog,
    gateway: InlineWidgetGateway,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment callback URLs cannot be built from
    /// the configured base URL.
    pub fn new(config: StorefrontConfig, catalog: StaticCatalog) -> Result<Self, StateError> {
        let callback_url = config.base_url.join(PAYMENT_SUCCESS_PATH)?;
        let cancel_url = config.base_url.join(PAYMENT_CANCEL_PATH)?;
        let gateway = InlineWidgetGateway::new(callback_url, cancel_url);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                gateway,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &StaticCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the payment gateway.
    #[must_use]
    pub fn gateway(&self) -> &InlineWidgetGateway {
        &self.inner.gateway
    }
}
