//! Session middleware: resolve the session cookie and keep it current.

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, SameSite},
    prelude::*,
};
use tracing::debug;

use tienda_app::domain::sessions::SessionId;

use crate::{
    extensions::*,
    state::{SessionCookie, State},
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let presented = req
        .cookie(&state.cookie.name)
        .and_then(|cookie| cookie.value().parse::<SessionId>().ok());

    let session = state.app.sessions.resolve(presented).await;

    if presented != Some(session) {
        debug!(session = %session, "issuing session cookie");

        res.add_cookie(session_cookie(&state.cookie, session));
    }

    depot.insert_session_id(session);

    ctrl.call_next(req, depot, res).await;
}

fn session_cookie(settings: &SessionCookie, session: SessionId) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build()
}
