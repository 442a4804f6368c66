//! Storefront session: the single owner of cart, preferences, and UI state.
//!
//! Every UI action runs to completion on `&mut self`; nothing is shared. A
//! multi-threaded embedding must serialize access (for example by wrapping
//! the session in a `Mutex`).
//!
//! Each cart mutation re-projects the [`CartView`] and hands it to the
//! renderer exactly once before the action returns.

use chrono::{DateTime, Utc};
use marmita_core::{PaymentMethod, PaymentRequest, Price, ProductId};
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::action::{Surface, UiAction};
use crate::cart::{Cart, LineItem};
use crate::catalog::{Catalog, Product};
use crate::error::{Result, StorefrontError};
use crate::gate::{AddDecision, AllergyGate, PendingAddition};
use crate::preferences::{PreferenceStore, SnapshotStore, UserPreferences};
use crate::view::{CartRenderer, CartView};

/// Open/closed state of the page's toggleable surfaces.
///
/// The allergy prompt is open exactly while an addition is pending; see
/// [`Session::pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overlays {
    pub cart_panel: bool,
    pub login: bool,
    pub checkout: bool,
}

impl Overlays {
    fn slot(&mut self, surface: Surface) -> &mut bool {
        match surface {
            Surface::CartPanel => &mut self.cart_panel,
            Surface::Login => &mut self.login,
            Surface::Checkout => &mut self.checkout,
        }
    }
}

/// Receipt for a simulated checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub total: Price,
    pub item_count: u64,
    pub payment: PaymentMethod,
}

/// What an action did, for the front-end to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Added { product_id: ProductId },
    AllergyPrompt { product_id: ProductId, allergen: String },
    Removed { product_id: ProductId },
    PendingDiscarded { product_id: ProductId },
    NothingPending,
    Surfaces { overlays: Overlays },
    OrderPlaced { order: OrderConfirmation },
    PreferencesSaved { preferences: UserPreferences },
}

/// One shopper's storefront state.
#[derive(Debug)]
pub struct Session<S, R> {
    catalog: Catalog,
    cart: Cart,
    gate: AllergyGate,
    preferences: UserPreferences,
    store: PreferenceStore<S>,
    overlays: Overlays,
    renderer: R,
}

impl<S: SnapshotStore, R: CartRenderer> Session<S, R> {
    /// Start a session: restore preferences and render the empty cart.
    pub fn start(catalog: Catalog, store: PreferenceStore<S>, renderer: R) -> Self {
        let preferences = store.load();
        let mut session = Self {
            catalog,
            cart: Cart::new(),
            gate: AllergyGate::new(),
            preferences,
            store,
            overlays: Overlays::default(),
            renderer,
        };
        session.render();
        session
    }

    /// Apply one UI action.
    ///
    /// # Errors
    ///
    /// See the individual operations.
    pub fn dispatch(&mut self, action: UiAction) -> Result<Outcome> {
        match action {
            UiAction::AddProduct { product_id } => self.add_product(&product_id),
            UiAction::RemoveItem { product_id } => Ok(self.remove_item(product_id)),
            UiAction::ToggleCartPanel => Ok(self.toggle_cart_panel()),
            UiAction::OpenLogin => Ok(self.open_login()),
            UiAction::Close { surface } => Ok(self.close(surface)),
            UiAction::OpenCheckout => self.open_checkout(),
            UiAction::SubmitCheckout { method, change_for } => self
                .submit_checkout(PaymentRequest::new(method, change_for))
                .map(|order| Outcome::OrderPlaced { order }),
            UiAction::SubmitRegistration { allergies, goals } => {
                self.submit_registration(UserPreferences::new(allergies.iter(), &goals))
            }
            UiAction::ConfirmPendingAddition => Ok(self.confirm_pending_addition()),
            UiAction::CancelPendingAddition => Ok(self.cancel_pending_addition()),
        }
    }

    /// Resolve `product_id` in the catalog and request its addition.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownProduct` if the catalog has no such
    /// product.
    pub fn add_product(&mut self, product_id: &ProductId) -> Result<Outcome> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or_else(|| StorefrontError::UnknownProduct(product_id.clone()))?;
        Ok(self.request_add(product))
    }

    /// Add `product`, or hold it behind an allergy prompt.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub fn request_add(&mut self, product: Product) -> Outcome {
        let product_id = product.id.clone();
        match self
            .gate
            .request_add(&mut self.cart, product, &self.preferences.allergies)
        {
            AddDecision::Added => {
                self.render();
                Outcome::Added { product_id }
            }
            AddDecision::NeedsConfirmation { allergen } => Outcome::AllergyPrompt {
                product_id,
                allergen,
            },
        }
    }

    /// Remove the cart line for `product_id`; absent ids leave the cart as is.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> Outcome {
        self.cart.remove(&product_id);
        self.render();
        Outcome::Removed { product_id }
    }

    pub fn toggle_cart_panel(&mut self) -> Outcome {
        self.overlays.cart_panel = !self.overlays.cart_panel;
        Outcome::Surfaces {
            overlays: self.overlays,
        }
    }

    pub fn open_login(&mut self) -> Outcome {
        self.overlays.login = true;
        Outcome::Surfaces {
            overlays: self.overlays,
        }
    }

    pub fn close(&mut self, surface: Surface) -> Outcome {
        *self.overlays.slot(surface) = false;
        Outcome::Surfaces {
            overlays: self.overlays,
        }
    }

    /// Open the checkout surface.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::EmptyCart` (nothing changes) if the cart is
    /// empty.
    pub fn open_checkout(&mut self) -> Result<Outcome> {
        if self.cart.is_empty() {
            debug!("Checkout refused, cart empty");
            return Err(StorefrontError::EmptyCart);
        }
        self.overlays.checkout = true;
        Ok(Outcome::Surfaces {
            overlays: self.overlays,
        })
    }

    /// Simulate placing the order: clear the cart and close checkout.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::EmptyCart` or `StorefrontError::Payment`
    /// without changing any state.
    #[instrument(skip(self, payment), fields(method = ?payment.method))]
    pub fn submit_checkout(&mut self, payment: PaymentRequest) -> Result<OrderConfirmation> {
        if self.cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        let payment = payment.validate()?;

        let order = OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            items: self.cart.items().to_vec(),
            total: self.cart.total(),
            item_count: self.cart.item_count(),
            payment,
        };

        self.cart.clear();
        self.render();
        self.overlays.checkout = false;

        info!(
            order_id = %order.order_id,
            total = %order.total,
            items = order.item_count,
            payment = %order.payment,
            "Order placed (simulated)"
        );
        Ok(order)
    }

    /// Replace the user's preferences and persist them.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Storage` if the snapshot cannot be written;
    /// the previous preferences stay in effect.
    #[instrument(skip_all)]
    pub fn submit_registration(&mut self, preferences: UserPreferences) -> Result<Outcome> {
        self.store.save(&preferences)?;
        self.preferences = preferences.clone();
        self.overlays.login = false;
        Ok(Outcome::PreferencesSaved { preferences })
    }

    /// Add the product held behind the allergy prompt.
    pub fn confirm_pending_addition(&mut self) -> Outcome {
        match self.gate.confirm(&mut self.cart) {
            Some(product) => {
                self.render();
                Outcome::Added {
                    product_id: product.id,
                }
            }
            None => Outcome::NothingPending,
        }
    }

    /// Discard the product held behind the allergy prompt.
    pub fn cancel_pending_addition(&mut self) -> Outcome {
        self.gate
            .cancel()
            .map_or(Outcome::NothingPending, |product| Outcome::PendingDiscarded {
                product_id: product.id,
            })
    }

    /// Current cart view, projected on demand.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::project(&self.cart)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    #[must_use]
    pub const fn overlays(&self) -> Overlays {
        self.overlays
    }

    /// The addition awaiting allergy confirmation, if the prompt is open.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAddition> {
        self.gate.pending()
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub const fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    fn render(&mut self) {
        let view = CartView::project(&self.cart);
        self.renderer.render(&view);
    }
}
