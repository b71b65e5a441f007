//! SMTP delivery over STARTTLS.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};

use crate::notifications::{
    errors::TransportError,
    transport::{MailTransport, OutgoingMail},
};

/// Connection settings for the outgoing mail relay.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,

    /// Upper bound for a whole delivery, connection and teardown included.
    pub timeout: Duration,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Sends mail through an authenticated STARTTLS relay.
///
/// No connection pool is kept: every delivery connects, authenticates, sends
/// and quits, and the connection is dropped on every exit path.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    timeout: Duration,
}

impl fmt::Debug for SmtpMailTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SmtpMailTransport {
    /// Prepare a transport for the configured relay. No connection is made yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay's TLS parameters cannot be built.
    pub fn new(config: SmtpConfig) -> Result<Self, TransportError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .timeout(Some(config.timeout));

        if let Some(username) = config.username {
            builder = builder.credentials(Credentials::new(
                username,
                config.password.unwrap_or_default(),
            ));
        }

        Ok(Self {
            mailer: builder.build(),
            timeout: config.timeout,
        })
    }
}

/// Build the wire message for an outgoing mail.
///
/// # Errors
///
/// Returns an error for unparseable addresses or an invalid message.
pub fn build_message(mail: &OutgoingMail) -> Result<Message, TransportError> {
    let from: Mailbox = mail.from.parse()?;
    let to: Mailbox = mail.to.parse()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())?;

    Ok(message)
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        let message = build_message(mail)?;

        debug!(to = %mail.to, "sending mail");

        let response = tokio::time::timeout(self.timeout, self.mailer.send(message))
            .await
            .map_err(|_elapsed| TransportError::Timeout)??;

        info!(to = %mail.to, code = %response.code(), "mail delivered");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "tienda@example.com".to_owned(),
            to: "ventas@example.com".to_owned(),
            subject: "New purchase without Mercado Pago".to_owned(),
            body: "- Harina: 2 unit(s)\n".to_owned(),
        }
    }

    #[test]
    fn config_debug_hides_password() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_owned(),
            port: 587,
            username: Some("tienda".to_owned()),
            password: Some("hunter2".to_owned()),
            timeout: Duration::from_secs(10),
        };

        let debug = format!("{config:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("smtp.example.com"));
    }

    #[test]
    fn builds_plain_text_message() -> TestResult {
        let message = build_message(&mail())?;
        let formatted = String::from_utf8(message.formatted())?;

        assert!(formatted.contains("Subject: New purchase without Mercado Pago"));
        assert!(formatted.contains("To: ventas@example.com"));
        assert!(formatted.contains("text/plain"));
        assert!(formatted.contains("Harina: 2 unit(s)"));

        Ok(())
    }

    #[test]
    fn rejects_bad_addresses() {
        let mail = OutgoingMail {
            to: "not an address".to_owned(),
            ..mail()
        };

        assert!(matches!(build_message(&mail), Err(TransportError::Address(_))));
    }
}
