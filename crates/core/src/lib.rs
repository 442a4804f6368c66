//! Marmita Core - Shared domain types.
//!
//! This crate provides the value types used across all Marmita components:
//! - `storefront` - Cart, allergy gate, preferences, and view projection
//! - `cli` - Terminal front-end that drives a storefront session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no logging, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, tags, and payments

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
