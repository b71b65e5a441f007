//! Payment provider interface.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::payments::{
    errors::ProviderError,
    models::{PaymentPreference, PaymentResponse, PreferenceResponse, ProviderReply},
};

#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a checkout preference.
    ///
    /// Not idempotent on the provider side beyond the supplied key, so callers
    /// must not retry with a fresh key.
    async fn create_preference(
        &self,
        preference: &PaymentPreference,
        idempotency_key: Uuid,
    ) -> Result<ProviderReply<PreferenceResponse>, ProviderError>;

    /// Fetch the current state of a payment.
    async fn get_payment(
        &self,
        payment_id: &str,
    ) -> Result<ProviderReply<PaymentResponse>, ProviderError>;
}
