//! Payment Handlers

pub(crate) mod callbacks;
pub(crate) mod checkout;
pub(crate) mod status;
