//! Cart Models

use std::{collections::BTreeMap, num::NonZeroU32};

use serde::{Deserialize, Serialize};

use crate::domain::catalog::models::ProductId;

/// Outcome of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The entry now holds the requested quantity.
    Set,

    /// A zero quantity removed the entry (or there was nothing to remove).
    Removed,

    /// Negative quantities leave the cart untouched.
    Ignored,
}

/// Per-session cart: product identifiers mapped to strictly positive quantities.
///
/// Entries never hold a zero quantity; setting a quantity to zero removes the
/// entry instead. Product identifiers are not checked against the catalog here,
/// unknown products simply fail to resolve when the cart is projected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: BTreeMap<ProductId, NonZeroU32>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    pub fn add(&mut self, product: ProductId) {
        self.entries
            .entry(product)
            .and_modify(|quantity| *quantity = quantity.saturating_add(1))
            .or_insert(NonZeroU32::MIN);
    }

    /// Overwrite the quantity of a product.
    ///
    /// Zero removes the entry and negative values are ignored. Quantities larger
    /// than `u32::MAX` saturate.
    pub fn set_quantity(&mut self, product: ProductId, quantity: i64) -> QuantityChange {
        if quantity < 0 {
            return QuantityChange::Ignored;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match NonZeroU32::new(quantity) {
            Some(quantity) => {
                self.entries.insert(product, quantity);

                QuantityChange::Set
            }
            None => {
                self.entries.remove(&product);

                QuantityChange::Removed
            }
        }
    }

    /// Remove a product entirely. Absent products are a no-op.
    pub fn remove(&mut self, product: ProductId) {
        self.entries.remove(&product);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn quantity(&self, product: ProductId) -> Option<u32> {
        self.entries.get(&product).copied().map(NonZeroU32::get)
    }

    /// Entries ordered by product identifier.
    pub fn entries(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.entries
            .iter()
            .map(|(product, quantity)| (*product, quantity.get()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> From<[(u32, u32); N]> for Cart {
    fn from(entries: [(u32, u32); N]) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter_map(|(product, quantity)| {
                    NonZeroU32::new(quantity).map(|quantity| (ProductId::new(product), quantity))
                })
                .collect(),
        }
    }
}
