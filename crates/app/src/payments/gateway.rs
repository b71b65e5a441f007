//! Gateway checkout: hand the cart to the hosted payment page.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    checkout::CheckoutError,
    domain::{
        carts::{Cart, project},
        catalog::Catalog,
    },
    payments::{
        errors::UNKNOWN_ERROR,
        models::{AutoReturn, BackUrls, Payer, PaymentPreference, PreferenceItem},
        provider::PaymentProvider,
    },
};

/// Result of starting a gateway checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    /// Send the buyer to the provider's payment page.
    Redirect(String),

    /// Nothing purchasable in the cart; back to the catalog.
    EmptyCart,
}

/// Builds payment preferences from the live cart and asks the provider for a
/// payment page.
///
/// The cart is never modified here: it survives failures so the buyer can
/// retry, and a successful hand-off leaves it to expire with the session.
pub struct GatewayCheckout {
    provider: Arc<dyn PaymentProvider>,
    catalog: Arc<dyn Catalog>,
    currency_id: String,
    back_urls: BackUrls,
}

impl GatewayCheckout {
    #[must_use]
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        catalog: Arc<dyn Catalog>,
        currency_id: impl Into<String>,
        back_urls: BackUrls,
    ) -> Self {
        Self {
            provider,
            catalog,
            currency_id: currency_id.into(),
            back_urls,
        }
    }

    /// Build the preference for a cart. Unresolvable entries are left out.
    pub fn build_preference(&self, cart: &Cart, payer_email: Option<&str>) -> PaymentPreference {
        let items = project(cart, self.catalog.as_ref())
            .items
            .into_iter()
            .map(|item| PreferenceItem {
                id: item.product.id.to_string(),
                title: item.product.name,
                quantity: item.quantity,
                currency_id: self.currency_id.clone(),
                unit_price: item.product.unit_price,
            })
            .collect();

        PaymentPreference {
            items,
            payer: payer_email.map(|email| Payer {
                email: email.to_owned(),
            }),
            back_urls: self.back_urls.clone(),
            auto_return: AutoReturn::Approved,
        }
    }

    /// Create a preference for the cart and return the provider's payment page.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Provider`] carrying the provider's message, or
    /// `"unknown error"` when it gives none.
    pub async fn initiate(
        &self,
        cart: &Cart,
        payer_email: Option<&str>,
    ) -> Result<GatewayOutcome, CheckoutError> {
        let preference = self.build_preference(cart, payer_email);

        if preference.items.is_empty() {
            return Ok(GatewayOutcome::EmptyCart);
        }

        let idempotency_key = Uuid::new_v4();

        let reply = self
            .provider
            .create_preference(&preference, idempotency_key)
            .await
            .map_err(|source| {
                error!(%idempotency_key, "failed to create payment preference: {source}");

                CheckoutError::Provider {
                    message: source.to_string(),
                }
            })?;

        let success = reply.is_success();
        let body = reply.response.unwrap_or_default();

        match body.init_point.filter(|url| !url.trim().is_empty()) {
            Some(url) if success => {
                info!(preference = ?body.id, "payment preference created");

                Ok(GatewayOutcome::Redirect(url))
            }
            _ => {
                let message = body.message.unwrap_or_else(|| UNKNOWN_ERROR.to_owned());

                warn!(status = reply.status, "payment provider rejected preference: {message}");

                Err(CheckoutError::Provider { message })
            }
        }
    }
}
