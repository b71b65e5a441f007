//! Add To Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::debug;

use crate::{extensions::*, state::State, views::Page};

use super::{CART_PATH, product_id};

/// Add one unit of a product and show the cart.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;
    let product = product_id(req)?;

    let mut stored = state.app.sessions.lock(session).await;

    stored.cart.add(product);

    debug!(%product, quantity = ?stored.cart.quantity(product), "added to cart");

    Page::redirect(CART_PATH)
}
