//! Notifications: checkout by mailing the order instead of taking payment.

pub mod errors;
mod service;
pub mod smtp;
mod transport;

pub use errors::TransportError;
pub use service::*;
pub use smtp::{SmtpConfig, SmtpMailTransport};
pub use transport::*;
