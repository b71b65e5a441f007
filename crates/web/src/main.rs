//! Tienda Web Server

use std::{process, sync::Arc, time::Duration};

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{debug, error, info};

use tienda_app::{context::AppContext, domain::sessions::SessionStore};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod carts;
mod catalog;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod payments;
mod purchases;
mod router;
mod sessions;
mod shutdown;
mod signup;
mod state;
#[cfg(test)]
mod test_helpers;
mod views;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Tienda web server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, stderr is the only channel left"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let app = match AppContext::from_settings(config.app_settings()) {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    tokio::spawn(purge_idle_sessions(Arc::clone(&app.sessions)));

    let sessions = Arc::clone(&app.sessions);

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(
            app,
            (&config.sessions).into(),
        )))
        .push(router::app_router());

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, sessions).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}

/// Discard idle sessions, and the carts in them, once a minute.
async fn purge_idle_sessions(sessions: Arc<SessionStore>) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);

    loop {
        interval.tick().await;

        let purged = sessions.purge_expired().await;

        if purged > 0 {
            debug!(purged, "expired idle sessions");
        }
    }
}
