//! Show Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use tienda_app::domain::carts::project;

use crate::{
    extensions::*,
    state::State,
    views::{self, Page},
};

/// Line items, subtotals and total for the session's cart.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;

    let projection = {
        let stored = state.app.sessions.lock(session).await;

        project(&stored.cart, state.app.catalog.as_ref())
    };

    Ok(Page::Html(views::cart(&projection, state.app.currency)))
}
