//! Errors shared by both checkout paths.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The payment provider refused or failed to create the preference.
    #[error("{message}")]
    Provider { message: String },

    /// The mail transport failed; the cart is left untouched.
    #[error("{message}")]
    Transport { message: String },
}
