//! Payments Config

use clap::Args;

/// Mercado Pago settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Mercado Pago access token
    #[arg(long, env = "MERCADOPAGO_ACCESS_TOKEN", hide_env_values = true)]
    pub mercadopago_access_token: String,

    /// Mercado Pago API base address
    #[arg(
        long,
        env = "MERCADOPAGO_API_URL",
        default_value = "https://api.mercadopago.com"
    )]
    pub mercadopago_api_url: String,

    /// Public address of this shop, used for the provider's return links
    #[arg(long, env = "PUBLIC_BASE_URL")]
    pub public_base_url: String,

    /// Timeout for each payment provider request, in seconds
    #[arg(long, env = "PAYMENT_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub payment_timeout_seconds: u64,

    /// Attempts for a payment status lookup
    #[arg(long, env = "PAYMENT_STATUS_RETRIES", default_value_t = 3_u32)]
    pub payment_status_retries: u32,

    /// Initial delay between payment status attempts, in milliseconds
    #[arg(long, env = "PAYMENT_STATUS_RETRY_BACKOFF_MS", default_value_t = 200_u64)]
    pub payment_status_retry_backoff_ms: u64,
}
