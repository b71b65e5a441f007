//! Errors

use salvo::http::StatusCode;

use tienda_app::{checkout::CheckoutError, payments::StatusError};

use crate::views::{self, Page};

/// Failed preference creation: a 500 page carrying the provider's message.
pub(crate) fn into_checkout_page(error: &CheckoutError) -> Page {
    Page::Failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        views::preference_failed(&error.to_string()),
    )
}

/// Failed status lookup: shown inline, the form stays one click away.
pub(crate) fn into_status_page(error: &StatusError) -> Page {
    match error {
        StatusError::MissingIdentifier => Page::Html(views::missing_payment_id()),
        StatusError::InvalidIdentifier => Page::Html(views::payment_status_failed(&error.to_string())),
        StatusError::Provider { message } => Page::Html(views::payment_status_failed(message)),
    }
}
