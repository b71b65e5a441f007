//! Signup guard.

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, views::Page};

/// Send visitors who have not signed up to the signup form.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let signed_up = match signed_up(depot).await {
        Ok(signed_up) => signed_up,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if signed_up {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    match Page::redirect("/signup") {
        Ok(page) => res.render(page),
        Err(error) => res.render(error),
    }

    ctrl.skip_rest();
}

async fn signed_up(depot: &Depot) -> Result<bool, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;

    Ok(state.app.sessions.lock(session).await.is_signed_up())
}
