//! Marmita Storefront library.
//!
//! The cart controller for the Marmita food-ordering page, as a library so
//! any presentation layer (the `marmita` terminal front-end, tests) can
//! drive it.
//!
//! # Architecture
//!
//! - [`cart`] - In-memory line items
//! - [`gate`] - Allergy confirmation between "add" requests and the cart
//! - [`preferences`] - User preferences and their durable snapshot
//! - [`view`] - Pure projection of the cart into a view-model
//! - [`session`] - Single owner of all state; one transition per [`UiAction`]
//! - [`catalog`] - Products the menu offers
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gate;
pub mod preferences;
pub mod session;
pub mod view;

pub use action::{Surface, UiAction};
pub use cart::{Cart, LineItem};
pub use catalog::{Catalog, Product};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use preferences::{FileSnapshotStore, MemorySnapshotStore, PreferenceStore, UserPreferences};
pub use session::{OrderConfirmation, Outcome, Overlays, Session};
pub use view::{CartRenderer, CartView, RecordingRenderer};
