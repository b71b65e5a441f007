//! Payment status lookups.

use std::{sync::Arc, time::Duration};

use tracing::warn;

use crate::payments::{
    errors::{ProviderError, StatusError, UNKNOWN_ERROR},
    models::{PaymentResponse, PaymentStatus, ProviderReply},
    provider::PaymentProvider,
};

/// Retry schedule for status lookups. Delays double after each failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

/// Fetches a payment from the provider and projects it for display.
pub struct PaymentStatusReconciler {
    provider: Arc<dyn PaymentProvider>,
    retry: RetryPolicy,
}

impl PaymentStatusReconciler {
    #[must_use]
    pub fn new(provider: Arc<dyn PaymentProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// Look up a payment.
    ///
    /// Transport failures are retried; provider replies, including error
    /// replies, are not.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::MissingIdentifier`] for a blank id and
    /// [`StatusError::InvalidIdentifier`] for a non-numeric one, neither
    /// calling the provider, or [`StatusError::Provider`] with a displayable
    /// message when the lookup fails.
    pub async fn get_status(&self, payment_id: &str) -> Result<PaymentStatus, StatusError> {
        let payment_id = payment_id.trim();

        if payment_id.is_empty() {
            return Err(StatusError::MissingIdentifier);
        }

        // Provider payment ids are numeric.
        if !payment_id.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(StatusError::InvalidIdentifier);
        }

        let reply = self.fetch(payment_id).await.map_err(|source| {
            warn!(payment_id, "payment status lookup failed: {source}");

            StatusError::Provider {
                message: source.to_string(),
            }
        })?;

        let success = reply.is_success();

        match reply.response {
            Some(response) if success => Ok(PaymentStatus::from_response(payment_id, response)),
            response => {
                let message = response
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_owned());

                warn!(payment_id, status = reply.status, "payment provider rejected lookup: {message}");

                Err(StatusError::Provider { message })
            }
        }
    }

    async fn fetch(&self, payment_id: &str) -> Result<ProviderReply<PaymentResponse>, ProviderError> {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.provider.get_payment(payment_id).await {
                Ok(reply) => return Ok(reply),
                Err(source) if attempt < attempts => {
                    let delay = self.retry.delay_after(attempt);

                    warn!(
                        payment_id,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "retrying payment status lookup: {source}"
                    );

                    tokio::time::sleep(delay).await;

                    attempt += 1;
                }
                Err(source) => return Err(source),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::payments::{
        mercadopago::decode_body,
        models::{PaymentPayer, Reported},
        provider::MockPaymentProvider,
    };

    use super::*;

    fn reconciler(provider: MockPaymentProvider, retry: RetryPolicy) -> PaymentStatusReconciler {
        PaymentStatusReconciler::new(Arc::new(provider), retry)
    }

    fn approved() -> ProviderReply<PaymentResponse> {
        ProviderReply {
            status: 200,
            response: Some(PaymentResponse {
                status: Some("approved".to_owned()),
                transaction_amount: Some(dec!(46800)),
                payment_method_id: Some("visa".to_owned()),
                date_created: Some("2026-10-17T12:00:00.000-03:00".to_owned()),
                payer: Some(PaymentPayer {
                    email: Some("ana@example.com".to_owned()),
                }),
                message: None,
            }),
        }
    }

    #[tokio::test]
    async fn empty_id_never_reaches_provider() {
        let mut provider = MockPaymentProvider::new();

        provider.expect_get_payment().never();

        let result = reconciler(provider, RetryPolicy::none()).get_status("").await;

        assert_eq!(result, Err(StatusError::MissingIdentifier));
    }

    #[tokio::test]
    async fn blank_id_is_missing() {
        let mut provider = MockPaymentProvider::new();

        provider.expect_get_payment().never();

        let result = reconciler(provider, RetryPolicy::none()).get_status("   ").await;

        assert_eq!(result, Err(StatusError::MissingIdentifier));
    }

    #[tokio::test]
    async fn non_numeric_id_never_reaches_provider() {
        let mut provider = MockPaymentProvider::new();

        provider.expect_get_payment().never();

        let reconciler = reconciler(provider, RetryPolicy::none());

        for payment_id in ["../../users/me?x=", "..", "12a", "1 2"] {
            assert_eq!(
                reconciler.get_status(payment_id).await,
                Err(StatusError::InvalidIdentifier),
                "{payment_id}"
            );
        }
    }

    #[tokio::test]
    async fn not_found_reply_surfaces_provider_message() {
        let mut provider = MockPaymentProvider::new();

        provider.expect_get_payment().once().return_once(|_| {
            Ok(decode_body(
                404,
                r#"{"message":"Payment not found","error":"not_found","status":404,"cause":[]}"#,
            ))
        });

        let result = reconciler(provider, RetryPolicy::none())
            .get_status("999")
            .await;

        assert_eq!(
            result,
            Err(StatusError::Provider {
                message: "Payment not found".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn approved_payment_is_projected() -> TestResult {
        let mut provider = MockPaymentProvider::new();

        provider
            .expect_get_payment()
            .once()
            .withf(|id| id == "123")
            .return_once(|_| Ok(approved()));

        let status = reconciler(provider, RetryPolicy::none())
            .get_status("123")
            .await?;

        assert_eq!(status.payment_id, "123");
        assert_eq!(status.status, "APPROVED");
        assert_eq!(status.amount, Reported::Value(dec!(46800)));
        assert_eq!(status.method, Reported::Value("visa".to_owned()));
        assert_eq!(status.payer_email, Reported::Value("ana@example.com".to_owned()));

        Ok(())
    }

    #[tokio::test]
    async fn partial_payment_still_renders() -> TestResult {
        let mut provider = MockPaymentProvider::new();

        provider.expect_get_payment().once().return_once(|_| {
            Ok(ProviderReply {
                status: 200,
                response: Some(PaymentResponse {
                    status: Some("pending".to_owned()),
                    ..PaymentResponse::default()
                }),
            })
        });

        let status = reconciler(provider, RetryPolicy::none())
            .get_status("123")
            .await?;

        assert_eq!(status.status, "PENDING");
        assert_eq!(status.amount, Reported::NotAvailable);
        assert_eq!(status.created_at.to_string(), "not available");

        Ok(())
    }

    #[tokio::test]
    async fn provider_error_body_becomes_message() {
        let mut provider = MockPaymentProvider::new();

        provider.expect_get_payment().once().return_once(|_| {
            Ok(ProviderReply {
                status: 404,
                response: Some(PaymentResponse {
                    message: Some("Payment not found".to_owned()),
                    ..PaymentResponse::default()
                }),
            })
        });

        let result = reconciler(provider, RetryPolicy::default())
            .get_status("999")
            .await;

        assert_eq!(
            result,
            Err(StatusError::Provider {
                message: "Payment not found".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn missing_body_is_unknown_error() {
        let mut provider = MockPaymentProvider::new();

        provider.expect_get_payment().once().return_once(|_| {
            Ok(ProviderReply {
                status: 200,
                response: None,
            })
        });

        let result = reconciler(provider, RetryPolicy::none())
            .get_status("1")
            .await;

        assert_eq!(
            result,
            Err(StatusError::Provider {
                message: "unknown error".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn transport_failures_are_retried() -> TestResult {
        let mut provider = MockPaymentProvider::new();
        let mut sequence = Sequence::new();

        provider
            .expect_get_payment()
            .times(2)
            .in_sequence(&mut sequence)
            .returning(|_| Err(ProviderError::Timeout));

        provider
            .expect_get_payment()
            .once()
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(approved()));

        let retry = RetryPolicy {
            attempts: 3,
            backoff: Duration::ZERO,
        };

        let status = reconciler(provider, retry).get_status("123").await?;

        assert_eq!(status.status, "APPROVED");

        Ok(())
    }

    #[tokio::test]
    async fn gives_up_after_last_attempt() {
        let mut provider = MockPaymentProvider::new();

        provider
            .expect_get_payment()
            .times(3)
            .returning(|_| Err(ProviderError::Timeout));

        let retry = RetryPolicy {
            attempts: 3,
            backoff: Duration::ZERO,
        };

        let result = reconciler(provider, retry).get_status("123").await;

        assert_eq!(
            result,
            Err(StatusError::Provider {
                message: "payment provider request timed out".to_owned()
            })
        );
    }

    #[test]
    fn backoff_doubles() {
        let retry = RetryPolicy {
            attempts: 4,
            backoff: Duration::from_millis(100),
        };

        assert_eq!(retry.delay_after(1), Duration::from_millis(100));
        assert_eq!(retry.delay_after(2), Duration::from_millis(200));
        assert_eq!(retry.delay_after(3), Duration::from_millis(400));
    }
}
