//! Allergy gate between "add product" requests and the cart.
//!
//! # States
//!
//! ```text
//!            request_add (no conflict)
//!   Direct ─────────────────────────────► cart.add
//!     │  ▲
//!     │  │ confirm ──► cart.add(held)
//!     │  │ cancel  ──► (cart untouched)
//!     ▼  │
//!   PendingConfirmation { product, allergen }
//! ```
//!
//! A product conflicts when one of its tags equals, after trimming and
//! lower-casing, one of the declared allergies. The reported allergen is the
//! first conflicting allergy in the order the user declared them.

use marmita_core::TagSet;
use serde::Serialize;
use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::Product;

/// A product held while the allergy prompt is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingAddition {
    pub product: Product,
    /// The allergy term surfaced in the prompt.
    pub allergen: String,
}

/// Result of [`AllergyGate::request_add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddDecision {
    /// The product went straight into the cart.
    Added,
    /// The product is held until the user confirms or cancels.
    NeedsConfirmation { allergen: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum GateState {
    #[default]
    Direct,
    PendingConfirmation(PendingAddition),
}

/// Two-state controller: `Direct` and `PendingConfirmation`.
#[derive(Debug, Clone, Default)]
pub struct AllergyGate {
    state: GateState,
}

impl AllergyGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The first declared allergy that `product` is tagged with, if any.
    #[must_use]
    pub fn conflict<'a>(product: &Product, allergies: &'a TagSet) -> Option<&'a str> {
        if allergies.is_empty() || product.tags.is_empty() {
            return None;
        }
        allergies.first_shared_with(&product.tags)
    }

    /// Add `product` to `cart` unless it conflicts with `allergies`.
    ///
    /// On conflict the product is held (replacing any product already held)
    /// and the cart is left untouched.
    pub fn request_add(
        &mut self,
        cart: &mut Cart,
        product: Product,
        allergies: &TagSet,
    ) -> AddDecision {
        if let Some(allergen) = Self::conflict(&product, allergies) {
            let allergen = allergen.to_string();
            info!(product = %product.id, "Allergy conflict, awaiting confirmation");
            if let GateState::PendingConfirmation(previous) = &self.state {
                debug!(replaced = %previous.product.id, "Replacing held product");
            }
            self.state = GateState::PendingConfirmation(PendingAddition {
                product,
                allergen: allergen.clone(),
            });
            return AddDecision::NeedsConfirmation { allergen };
        }

        cart.add(product.id, product.name, product.price);
        AddDecision::Added
    }

    /// Add the held product to `cart` and return to `Direct`.
    ///
    /// Returns the product that was added, or `None` if nothing was held.
    pub fn confirm(&mut self, cart: &mut Cart) -> Option<Product> {
        let pending = self.take_pending()?;
        info!(product = %pending.product.id, "Allergy warning confirmed");
        let product = pending.product;
        cart.add(product.id.clone(), product.name.clone(), product.price);
        Some(product)
    }

    /// Drop the held product and return to `Direct`.
    ///
    /// Returns the discarded product, or `None` if nothing was held.
    pub fn cancel(&mut self) -> Option<Product> {
        let pending = self.take_pending()?;
        debug!(product = %pending.product.id, "Held product discarded");
        Some(pending.product)
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAddition> {
        match &self.state {
            GateState::Direct => None,
            GateState::PendingConfirmation(pending) => Some(pending),
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, GateState::PendingConfirmation(_))
    }

    fn take_pending(&mut self) -> Option<PendingAddition> {
        match std::mem::take(&mut self.state) {
            GateState::Direct => None,
            GateState::PendingConfirmation(pending) => Some(pending),
        }
    }
}
