//! Cart projection: line items and totals derived from a cart and the catalog.

use rust_decimal::Decimal;

use crate::domain::{
    carts::models::Cart,
    catalog::{Catalog, models::Product},
};

/// A resolved cart entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Line items plus their total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartProjection {
    pub items: Vec<LineItem>,
    pub total: Decimal,
}

impl CartProjection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Project a cart against the catalog.
///
/// Entries whose product does not resolve are left out of both the items and
/// the total.
pub fn project(cart: &Cart, catalog: &dyn Catalog) -> CartProjection {
    let items: Vec<LineItem> = cart
        .entries()
        .filter_map(|(id, quantity)| {
            let product = catalog.product(id)?;

            Some(LineItem {
                subtotal: product.unit_price * Decimal::from(quantity),
                product: product.clone(),
                quantity,
            })
        })
        .collect();

    let total = items.iter().map(|item| item.subtotal).sum();

    CartProjection { items, total }
}
