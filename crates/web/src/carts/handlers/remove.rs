//! Remove From Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, views::Page};

use super::{CART_PATH, product_id};

/// Drop a product from the cart. Absent products are a no-op.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;
    let product = product_id(req)?;

    state.app.sessions.lock(session).await.cart.remove(product);

    Page::redirect(CART_PATH)
}
