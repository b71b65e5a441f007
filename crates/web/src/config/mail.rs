//! Mail Config

use clap::Args;

/// Outgoing mail settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// SMTP relay host (STARTTLS)
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: String,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587_u16)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password or app token
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender address for purchase notifications
    #[arg(long, env = "MAIL_FROM")]
    pub mail_from: String,

    /// Recipient address for purchase notifications
    #[arg(long, env = "MAIL_TO")]
    pub mail_to: String,

    /// Subject line for purchase notifications
    #[arg(
        long,
        env = "MAIL_SUBJECT",
        default_value = "New purchase without Mercado Pago"
    )]
    pub mail_subject: String,

    /// Timeout for a whole mail delivery, in seconds
    #[arg(long, env = "MAIL_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub mail_timeout_seconds: u64,
}
