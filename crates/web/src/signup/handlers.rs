//! Signup Handlers

use std::sync::Arc;

use salvo::prelude::*;
use tokio::task;
use tracing::{error, info};

use tienda_app::domain::signup::{self, SignupError};

use crate::{
    extensions::*,
    state::State,
    views::{self, Page},
};

/// Signup form.
#[salvo::handler]
pub(crate) async fn show() -> Page {
    Page::Html(views::signup(None))
}

/// Validate credentials, remember the signup in the session, and continue to the catalog.
#[salvo::handler]
pub(crate) async fn submit(req: &mut Request, depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_id_or_500()?;

    let email = req.form::<String>("email").await;
    let password = req.form::<String>("password").await;

    let registration = task::spawn_blocking(move || signup::register(email, password))
        .await
        .map_err(|join_error| {
            error!("signup task failed: {join_error}");

            StatusError::internal_server_error()
        })?;

    match registration {
        Ok(registration) => {
            info!(session = %session, "signup completed");

            state.app.sessions.lock(session).await.registration = Some(registration);

            Page::redirect("/")
        }
        Err(SignupError::Hashing(source)) => {
            error!("failed to hash signup password: {source}");

            Err(StatusError::internal_server_error())
        }
        Err(invalid) => Ok(Page::Html(views::signup(Some(&invalid.to_string())))),
    }
}
