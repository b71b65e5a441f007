//! Mail transport errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build mail message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("mail delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("mail delivery timed out")]
    Timeout,
}
