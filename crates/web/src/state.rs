//! State

use std::sync::Arc;

use tienda_app::context::AppContext;

use crate::config::sessions::SessionConfig;

/// How the session token travels to and from the browser.
#[derive(Debug, Clone)]
pub(crate) struct SessionCookie {
    pub(crate) name: String,
    pub(crate) secure: bool,
}

impl From<&SessionConfig> for SessionCookie {
    fn from(config: &SessionConfig) -> Self {
        Self {
            name: config.session_cookie_name.clone(),
            secure: config.session_cookie_secure,
        }
    }
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) cookie: SessionCookie,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cookie: SessionCookie) -> Self {
        Self { app, cookie }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, cookie: SessionCookie) -> Arc<Self> {
        Arc::new(Self::new(app, cookie))
    }
}
