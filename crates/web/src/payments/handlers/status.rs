//! Payment Status Handlers

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    payments::errors::into_status_page,
    state::State,
    views::{self, Page},
};

/// Look up a payment by the `payment_id` query parameter.
#[salvo::handler]
pub(crate) async fn show(req: &mut Request, depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let payment_id = req.query::<String>("payment_id").unwrap_or_default();

    let page = match state.app.reconciler.get_status(&payment_id).await {
        Ok(status) => Page::Html(views::payment_status(&status, state.app.currency)),
        Err(error) => into_status_page(&error),
    };

    Ok(page)
}

/// Form asking for a payment id.
#[salvo::handler]
pub(crate) async fn form() -> Page {
    Page::Html(views::payment_status_form())
}
