//! In-memory cart.
//!
//! The cart is created empty for each session, mutated by add/remove, and
//! cleared on checkout. It is never persisted. Rendering is not triggered
//! here; the session re-projects the view after each mutating call.

use marmita_core::{Price, ProductId};
use serde::Serialize;
use tracing::debug;

/// One product entry in the cart with an aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl LineItem {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Line items in insertion order, at most one per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the quantity of an existing line with the same id, or
    /// appends a new line with quantity 1. Inputs are taken as-is.
    pub fn add(&mut self, id: ProductId, name: impl Into<String>, unit_price: Price) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(id = %item.id, quantity = item.quantity, "Incremented cart line");
            return;
        }

        debug!(%id, "Appended cart line");
        self.items.push(LineItem {
            id,
            name: name.into(),
            unit_price,
            quantity: 1,
        });
    }

    /// Remove the line for `id`.
    ///
    /// Returns `false` (and leaves the cart untouched) if there was none.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        let removed = self.items.len() != before;
        debug!(%id, removed, "Removed cart line");
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities (not the number of distinct lines).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
