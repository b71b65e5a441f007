//! App Context

use std::{path::PathBuf, sync::Arc, time::Duration};

use rusty_money::{Findable, iso::Currency};
use thiserror::Error;
use tracing::info;

use crate::{
    domain::{
        catalog::{Catalog, CatalogError, StaticCatalog},
        sessions::SessionStore,
    },
    notifications::{MailRoute, MailTransport, NotificationCheckout, SmtpConfig, SmtpMailTransport, TransportError},
    payments::{
        BackUrls, GatewayCheckout, MercadoPagoClient, MercadoPagoConfig, PaymentProvider,
        PaymentStatusReconciler, ProviderError, RetryPolicy,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load catalog")]
    Catalog(#[from] CatalogError),

    #[error("failed to build payment provider client")]
    Provider(#[from] ProviderError),

    #[error("failed to build mail transport")]
    Mail(#[from] TransportError),
}

/// Everything needed to build an [`AppContext`] against real collaborators.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// YAML catalog; the demo catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
    pub currency_code: String,
    pub session_idle_timeout: Duration,
    pub public_base_url: String,
    pub mercadopago: MercadoPagoConfig,
    pub status_retry: RetryPolicy,
    pub smtp: SmtpConfig,
    pub mail_route: MailRoute,
}

/// Shared services handed to every request.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn Catalog>,
    pub currency: &'static Currency,
    pub sessions: Arc<SessionStore>,
    pub gateway: Arc<GatewayCheckout>,
    pub reconciler: Arc<PaymentStatusReconciler>,
    pub notifications: Arc<NotificationCheckout>,
}

/// Collaborators an [`AppContext`] is assembled from.
pub struct Collaborators {
    pub catalog: Arc<dyn Catalog>,
    pub currency: &'static Currency,
    pub provider: Arc<dyn PaymentProvider>,
    pub mail: Arc<dyn MailTransport>,
    pub back_urls: BackUrls,
    pub status_retry: RetryPolicy,
    pub mail_route: MailRoute,
    pub session_idle_timeout: Duration,
}

impl AppContext {
    /// Wire the checkout services around the given collaborators.
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            catalog,
            currency,
            provider,
            mail,
            back_urls,
            status_retry,
            mail_route,
            session_idle_timeout,
        } = collaborators;

        Self {
            gateway: Arc::new(GatewayCheckout::new(
                Arc::clone(&provider),
                Arc::clone(&catalog),
                currency.iso_alpha_code,
                back_urls,
            )),
            reconciler: Arc::new(PaymentStatusReconciler::new(provider, status_retry)),
            notifications: Arc::new(NotificationCheckout::new(mail, Arc::clone(&catalog), mail_route)),
            sessions: Arc::new(SessionStore::new(session_idle_timeout)),
            catalog,
            currency,
        }
    }

    /// Build application context backed by Mercado Pago and an SMTP relay.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be loaded, the currency is
    /// unknown, or a client cannot be built.
    pub fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let catalog = match &settings.catalog_path {
            Some(path) => StaticCatalog::from_yaml_path(path)?,
            None => StaticCatalog::demo(),
        };

        info!(products = catalog.len(), "catalog loaded");

        let currency = find_currency(&settings.currency_code)?;

        Ok(Self::new(Collaborators {
            catalog: Arc::new(catalog),
            currency,
            provider: Arc::new(MercadoPagoClient::new(settings.mercadopago)?),
            mail: Arc::new(SmtpMailTransport::new(settings.smtp)?),
            back_urls: BackUrls::from_base_url(&settings.public_base_url),
            status_retry: settings.status_retry,
            mail_route: settings.mail_route,
            session_idle_timeout: settings.session_idle_timeout,
        }))
    }
}

/// Resolve an ISO 4217 code such as `"ARS"`.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for codes rusty-money does not know.
pub fn find_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    let code = code.trim().to_ascii_uppercase();

    Currency::find(&code).ok_or(CatalogError::UnknownCurrency(code))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn currency_codes_are_case_insensitive() -> TestResult {
        assert_eq!(find_currency(" ars ")?.iso_alpha_code, "ARS");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert!(matches!(
            find_currency("XYZ"),
            Err(CatalogError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }
}
