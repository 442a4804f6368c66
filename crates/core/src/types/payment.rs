//! Payment details collected by the checkout form.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Errors raised when the checkout form is incomplete.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Paying in cash requires the amount the customer will hand over.
    #[error("cash payments require a change amount")]
    MissingChangeAmount,
}

/// The payment option picked on the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Pix,
    Card,
    Cash,
}

/// Raw checkout form input, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentKind,
    /// Only meaningful for cash; ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_for: Option<Price>,
}

impl PaymentRequest {
    #[must_use]
    pub const fn new(method: PaymentKind, change_for: Option<Price>) -> Self {
        Self { method, change_for }
    }

    /// Validate the form into a [`PaymentMethod`].
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::MissingChangeAmount`] for cash without a
    /// change amount.
    pub fn validate(self) -> Result<PaymentMethod, PaymentError> {
        match self.method {
            PaymentKind::Pix => Ok(PaymentMethod::Pix),
            PaymentKind::Card => Ok(PaymentMethod::Card),
            PaymentKind::Cash => self
                .change_for
                .map(|change_for| PaymentMethod::Cash { change_for })
                .ok_or(PaymentError::MissingChangeAmount),
        }
    }
}

/// A validated payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Card,
    Cash { change_for: Price },
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pix => f.write_str("Pix"),
            Self::Card => f.write_str("cartão"),
            Self::Cash { change_for } => write!(f, "dinheiro (troco para {change_for})"),
        }
    }
}
