//! Purchase Handler

use std::sync::Arc;

use salvo::prelude::*;

use tienda_app::notifications::NotificationOutcome;

use crate::{
    extensions::*,
    state::State,
    views::{self, Page},
};

/// Mail the order instead of taking payment, then empty the cart.
///
/// Delivery failures leave the cart intact and are shown on the page.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;

    let mut stored = state.app.sessions.lock(session).await;

    match state.app.notifications.initiate(&mut stored.cart).await {
        Ok(NotificationOutcome::Sent) => Ok(Page::Html(views::purchase_sent())),
        Ok(NotificationOutcome::EmptyCart) => Page::redirect("/"),
        Err(error) => Ok(Page::Html(views::purchase_failed(&error.to_string()))),
    }
}
