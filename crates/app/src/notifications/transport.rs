//! Mail transport interface.

use async_trait::async_trait;
use mockall::automock;

use crate::notifications::errors::TransportError;

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[automock]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a single message. Implementations release their connection
    /// before returning, whether or not delivery succeeded.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError>;
}
