//! Gateway Return Handlers

use salvo::prelude::*;

use crate::views::{self, Page};

/// Approved payment: echo the outcome and link to the status lookup.
#[salvo::handler]
pub(crate) async fn success(req: &mut Request) -> Page {
    let payment_id = req.query::<String>("payment_id");
    let status = req.query::<String>("status");

    Page::Html(views::payment_success(
        status.as_deref(),
        payment_id.as_deref(),
    ))
}

/// Failed payment: back to the cart, which is still intact.
#[salvo::handler]
pub(crate) async fn failure() -> Result<Page, StatusError> {
    Page::redirect("/carrito")
}

#[salvo::handler]
pub(crate) async fn pending() -> Page {
    Page::Html(views::payment_pending())
}
