//! Test helpers.

use std::{sync::Arc, time::Duration};

use rusty_money::iso;
use salvo::{affix_state::inject, prelude::*};

use tienda_app::{
    context::{AppContext, Collaborators},
    domain::{
        catalog::StaticCatalog,
        sessions::SessionId,
        signup::{self, SignupError},
    },
    notifications::{MailRoute, MockMailTransport},
    payments::{BackUrls, MockPaymentProvider, RetryPolicy},
};

use crate::{
    sessions,
    state::{SessionCookie, State},
};

pub(crate) const COOKIE_NAME: &str = "tienda_session";

pub(crate) const TEST_EMAIL: &str = "ana@example.com";

fn strict_provider_mock() -> MockPaymentProvider {
    let mut provider = MockPaymentProvider::new();

    provider.expect_create_preference().never();
    provider.expect_get_payment().never();

    provider
}

fn strict_mail_mock() -> MockMailTransport {
    let mut mail = MockMailTransport::new();

    mail.expect_send().never();

    mail
}

pub(crate) fn state_with(provider: MockPaymentProvider, mail: MockMailTransport) -> Arc<State> {
    let app = AppContext::new(Collaborators {
        catalog: Arc::new(StaticCatalog::demo()),
        currency: iso::ARS,
        provider: Arc::new(provider),
        mail: Arc::new(mail),
        back_urls: BackUrls::from_base_url("https://tienda.example"),
        status_retry: RetryPolicy::none(),
        mail_route: MailRoute {
            from: "tienda@example.com".to_owned(),
            to: "ventas@example.com".to_owned(),
            subject: "New purchase without Mercado Pago".to_owned(),
        },
        session_idle_timeout: Duration::from_secs(3_600),
    });

    State::from_app_context(
        app,
        SessionCookie {
            name: COOKIE_NAME.to_owned(),
            secure: false,
        },
    )
}

pub(crate) fn test_state() -> Arc<State> {
    state_with(strict_provider_mock(), strict_mail_mock())
}

pub(crate) fn state_with_provider(provider: MockPaymentProvider) -> Arc<State> {
    state_with(provider, strict_mail_mock())
}

pub(crate) fn state_with_mail(mail: MockMailTransport) -> Arc<State> {
    state_with(strict_provider_mock(), mail)
}

pub(crate) fn cookie_header(session: SessionId) -> String {
    format!("{COOKIE_NAME}={session}")
}

/// Start a session that has completed signup.
pub(crate) async fn sign_up(state: &State) -> Result<SessionId, SignupError> {
    let session = state.app.sessions.resolve(None).await;
    let registration = signup::register(Some(TEST_EMAIL.to_owned()), Some("Secreto1!".to_owned()))?;

    state.app.sessions.lock(session).await.registration = Some(registration);

    Ok(session)
}

/// Start an anonymous session.
pub(crate) async fn anonymous(state: &State) -> SessionId {
    state.app.sessions.resolve(None).await
}

pub(crate) fn app_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(sessions::middleware::handler)
            .push(route),
    )
}
