//! Cart Handlers

pub(crate) mod add;
pub(crate) mod remove;
pub(crate) mod show;
pub(crate) mod update;

use salvo::prelude::*;

use tienda_app::domain::catalog::models::ProductId;

pub(crate) const CART_PATH: &str = "/carrito";

/// Product identifier from the `{id}` path segment; anything else is a 404.
fn product_id(req: &Request) -> Result<ProductId, StatusError> {
    req.param::<u32>("id")
        .map(ProductId::new)
        .ok_or_else(StatusError::not_found)
}
