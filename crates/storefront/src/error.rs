//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type. Session operations return
//! `Result<T, StorefrontError>`; the front-end decides how to surface each
//! variant (blocking notice, form validation message, or fatal startup error).

use marmita_core::{PaymentError, ProductId};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::preferences::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// An action referenced a product the catalog does not know.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Checkout attempted with zero items. No state changed.
    #[error("Seu carrinho está vazio!")]
    EmptyCart,

    /// The checkout form is missing a required detail. Submission aborted.
    #[error("Invalid payment: {0}")]
    Payment(#[from] PaymentError),

    /// Preference snapshot could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Product catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl StorefrontError {
    /// Validation gates the user can fix and retry; everything else is an
    /// environment problem.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::EmptyCart | Self::Payment(_) | Self::UnknownProduct(_)
        )
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
