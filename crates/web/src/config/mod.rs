//! Server configuration module

use std::time::Duration;

use clap::{Args, Parser};

use tienda_app::{
    context::AppSettings,
    notifications::{MailRoute, SmtpConfig},
    payments::{MercadoPagoConfig, RetryPolicy},
};

use crate::config::{
    catalog::CatalogConfig, mail::MailConfig, observability::LoggingConfig,
    payments::PaymentsConfig, sessions::SessionConfig,
};

pub(crate) mod catalog;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod sessions;

pub(crate) use observability::LogFormat;

/// Address the shop listens on.
#[derive(Debug, Args)]
pub struct ListenConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub server_host: String,

    /// Port to bind
    #[arg(short = 'p', long, env = "SERVER_PORT", default_value_t = 8698_u16)]
    pub server_port: u16,
}

/// Tienda web server configuration
#[derive(Debug, Parser)]
#[command(name = "tienda-web", about = "Tienda web shop server", long_about = None)]
pub struct ServerConfig {
    /// Listen address.
    #[command(flatten)]
    pub listen: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Session cookie and expiry settings.
    #[command(flatten)]
    pub sessions: SessionConfig,

    /// Product catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Mercado Pago settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Outgoing mail settings.
    #[command(flatten)]
    pub mail: MailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.listen.server_host, self.listen.server_port)
    }

    /// Settings for building the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            catalog_path: self.catalog.catalog_path.clone(),
            currency_code: self.catalog.catalog_currency.clone(),
            session_idle_timeout: self.sessions.idle_timeout(),
            public_base_url: self.payments.public_base_url.clone(),
            mercadopago: MercadoPagoConfig {
                api_url: self.payments.mercadopago_api_url.clone(),
                access_token: self.payments.mercadopago_access_token.clone(),
                timeout: Duration::from_secs(self.payments.payment_timeout_seconds),
            },
            status_retry: RetryPolicy {
                attempts: self.payments.payment_status_retries.max(1),
                backoff: Duration::from_millis(self.payments.payment_status_retry_backoff_ms),
            },
            smtp: SmtpConfig {
                host: self.mail.smtp_host.clone(),
                port: self.mail.smtp_port,
                username: self.mail.smtp_username.clone(),
                password: self.mail.smtp_password.clone(),
                timeout: Duration::from_secs(self.mail.mail_timeout_seconds),
            },
            mail_route: MailRoute {
                from: self.mail.mail_from.clone(),
                to: self.mail.mail_to.clone(),
                subject: self.mail.mail_subject.clone(),
            },
        }
    }
}
