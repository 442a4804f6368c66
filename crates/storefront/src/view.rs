//! Cart view-model and renderers.
//!
//! [`CartView::project`] is a pure function of the cart: projecting the same
//! cart twice yields equal views. Presentation layers implement
//! [`CartRenderer`] and receive a fresh view after every cart mutation.

use marmita_core::ProductId;
use serde::Serialize;

use crate::cart::{Cart, LineItem};

/// Placeholder shown when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Seu carrinho está vazio.";

/// One display row per cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// `unit_price * quantity`, formatted.
    pub line_price: String,
}

impl From<&LineItem> for CartRow {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            line_price: item.line_total().to_string(),
        }
    }
}

/// Everything the cart panel and checkout surface display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub total: String,
    /// Shown on the checkout surface; always equal to `total`.
    pub checkout_total: String,
    pub item_count: u64,
    /// Show the empty-state placeholder instead of rows.
    pub show_empty_state: bool,
    pub checkout_enabled: bool,
}

impl CartView {
    /// Project the current cart state.
    #[must_use]
    pub fn project(cart: &Cart) -> Self {
        let total = cart.total().to_string();
        let empty = cart.is_empty();

        Self {
            rows: cart.items().iter().map(CartRow::from).collect(),
            checkout_total: total.clone(),
            total,
            item_count: cart.item_count(),
            show_empty_state: empty,
            checkout_enabled: !empty,
        }
    }

    /// The view of an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::project(&Cart::new())
    }
}

/// A presentation layer bound to the cart view.
pub trait CartRenderer {
    /// Called once after every cart mutation with the re-projected view.
    fn render(&mut self, view: &CartView);
}

/// Keeps the most recent view and counts renders.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    last: Option<CartView>,
    renders: usize,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn last(&self) -> Option<&CartView> {
        self.last.as_ref()
    }

    /// Number of renders received so far.
    #[must_use]
    pub const fn renders(&self) -> usize {
        self.renders
    }
}

impl CartRenderer for RecordingRenderer {
    fn render(&mut self, view: &CartView) {
        self.last = Some(view.clone());
        self.renders += 1;
    }
}

impl<R: CartRenderer + ?Sized> CartRenderer for &mut R {
    fn render(&mut self, view: &CartView) {
        (**self).render(view);
    }
}
