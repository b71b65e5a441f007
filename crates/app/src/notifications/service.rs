//! Notification checkout: mail the order and empty the cart.

use std::{fmt::Write as _, sync::Arc};

use tracing::{error, info};

use crate::{
    checkout::CheckoutError,
    domain::{
        carts::{Cart, project},
        catalog::Catalog,
    },
    notifications::transport::{MailTransport, OutgoingMail},
};

/// Sender, recipient and subject for order notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub from: String,
    pub to: String,
    pub subject: String,
}

/// Result of a notification checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The order was mailed and the cart emptied.
    Sent,

    /// Nothing in the cart; back to the catalog.
    EmptyCart,
}

pub struct NotificationCheckout {
    transport: Arc<dyn MailTransport>,
    catalog: Arc<dyn Catalog>,
    route: MailRoute,
}

impl NotificationCheckout {
    #[must_use]
    pub fn new(transport: Arc<dyn MailTransport>, catalog: Arc<dyn Catalog>, route: MailRoute) -> Self {
        Self {
            transport,
            catalog,
            route,
        }
    }

    /// Plain-text order summary, one line per resolvable entry.
    pub fn compose_body(&self, cart: &Cart) -> String {
        let mut body = String::from("Purchase details (no payment gateway):\n\n");

        for item in project(cart, self.catalog.as_ref()).items {
            _ = writeln!(body, "- {}: {} unit(s)", item.product.name, item.quantity);
        }

        body
    }

    /// Mail the cart's contents and clear it once delivery succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Transport`] with the transport's message when
    /// delivery fails; the cart is left as it was.
    pub async fn initiate(&self, cart: &mut Cart) -> Result<NotificationOutcome, CheckoutError> {
        if cart.is_empty() {
            return Ok(NotificationOutcome::EmptyCart);
        }

        let mail = OutgoingMail {
            from: self.route.from.clone(),
            to: self.route.to.clone(),
            subject: self.route.subject.clone(),
            body: self.compose_body(cart),
        };

        self.transport.send(&mail).await.map_err(|source| {
            error!(to = %mail.to, "failed to send purchase notification: {source}");

            CheckoutError::Transport {
                message: source.to_string(),
            }
        })?;

        info!(entries = cart.len(), "purchase notification sent");

        cart.clear();

        Ok(NotificationOutcome::Sent)
    }
}
