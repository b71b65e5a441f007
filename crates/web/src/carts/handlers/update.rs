//! Update Cart Quantity Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::debug;

use crate::{extensions::*, state::State, views::Page};

use super::{CART_PATH, product_id};

/// Set a product's quantity from the `cantidad` form field.
///
/// Zero removes the product. Negative, missing or non-numeric values leave the
/// cart as it was.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;
    let product = product_id(req)?;

    let quantity = req
        .form::<String>("cantidad")
        .await
        .and_then(|value| value.trim().parse::<i64>().ok());

    if let Some(quantity) = quantity {
        let change = state
            .app
            .sessions
            .lock(session)
            .await
            .cart
            .set_quantity(product, quantity);

        debug!(%product, quantity, ?change, "cart quantity updated");
    }

    Page::redirect(CART_PATH)
}
