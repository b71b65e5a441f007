//! Mercado Pago REST client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::payments::{
    errors::ProviderError,
    models::{PaymentPreference, PaymentResponse, PreferenceResponse, ProviderReply},
    provider::PaymentProvider,
};

const IDEMPOTENCY_KEY_HEADER: &str = "X-Idempotency-Key";

/// Everything but unreserved characters, dots included, so an id stays one
/// path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Configuration for connecting to the Mercado Pago API.
#[derive(Clone)]
pub struct MercadoPagoConfig {
    /// API base address, e.g. `"https://api.mercadopago.com"`.
    pub api_url: String,

    /// Account access token.
    pub access_token: String,

    /// Upper bound for every request, connection included.
    pub timeout: Duration,
}

impl fmt::Debug for MercadoPagoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MercadoPagoConfig")
            .field("api_url", &self.api_url)
            .field("access_token", &"**redacted**")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for preferences and payments.
#[derive(Debug, Clone)]
pub struct MercadoPagoClient {
    config: MercadoPagoConfig,
    http: Client,
}

impl MercadoPagoClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: MercadoPagoConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn payment_endpoint(&self, payment_id: &str) -> String {
        self.endpoint(&format!(
            "v1/payments/{}",
            utf8_percent_encode(payment_id, PATH_SEGMENT)
        ))
    }
}

#[async_trait]
impl PaymentProvider for MercadoPagoClient {
    async fn create_preference(
        &self,
        preference: &PaymentPreference,
        idempotency_key: Uuid,
    ) -> Result<ProviderReply<PreferenceResponse>, ProviderError> {
        let response = self
            .http
            .post(self.endpoint("checkout/preferences"))
            .bearer_auth(&self.config.access_token)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
            .json(preference)
            .send()
            .await?;

        decode(response).await
    }

    async fn get_payment(
        &self,
        payment_id: &str,
    ) -> Result<ProviderReply<PaymentResponse>, ProviderError> {
        let response = self
            .http
            .get(self.payment_endpoint(payment_id))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<ProviderReply<T>, ProviderError> {
    let status = response.status().as_u16();
    let text = response.text().await?;

    debug!(status, "payment provider replied");

    Ok(decode_body(status, &text))
}

/// Decode a provider body. Empty or unparseable bodies become `None` so the
/// caller can still report the status.
pub(crate) fn decode_body<T: DeserializeOwned>(status: u16, text: &str) -> ProviderReply<T> {
    if text.trim().is_empty() {
        return ProviderReply {
            status,
            response: None,
        };
    }

    let response = match serde_json::from_str(text) {
        Ok(body) => Some(body),
        Err(source) => {
            warn!(status, "could not decode payment provider response: {source}");

            None
        }
    };

    ProviderReply { status, response }
}
