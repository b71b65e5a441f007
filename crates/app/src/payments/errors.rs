//! Payment errors.

use thiserror::Error;

/// Message used when the provider gives no reason for a failure.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Errors talking to the payment provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("payment provider request timed out")]
    Timeout,

    #[error("payment provider request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("could not build payment provider client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}

/// Errors looking up a payment's status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("missing payment identifier")]
    MissingIdentifier,

    #[error("invalid payment identifier")]
    InvalidIdentifier,

    #[error("{message}")]
    Provider { message: String },
}
