//! Core types for Marmita.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod payment;
pub mod price;
pub mod tags;

pub use id::*;
pub use payment::{PaymentError, PaymentKind, PaymentMethod, PaymentRequest};
pub use price::{ParsePriceError, Price};
pub use tags::TagSet;
