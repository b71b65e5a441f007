//! Gateway Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;

use tienda_app::payments::GatewayOutcome;

use crate::{extensions::*, payments::errors::into_checkout_page, state::State, views::Page};

/// Create a payment preference for the cart and send the buyer to the provider.
///
/// The session stays locked while the preference is created, so the cart that
/// is charged is the cart that was shown.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;

    let stored = state.app.sessions.lock(session).await;

    let outcome = state
        .app
        .gateway
        .initiate(&stored.cart, stored.email())
        .await;

    match outcome {
        Ok(GatewayOutcome::Redirect(url)) => Page::redirect(&url),
        Ok(GatewayOutcome::EmptyCart) => Page::redirect("/"),
        Err(error) => Ok(into_checkout_page(&error)),
    }
}
