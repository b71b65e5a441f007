//! Stop serving on Ctrl+C or SIGTERM.

use std::{io, sync::Arc, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

use tienda_app::domain::sessions::SessionStore;

/// How long in-flight requests get to finish once a signal arrives.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),

    #[cfg(windows)]
    #[error("failed to install console close handler: {0}")]
    Close(#[source] io::Error),
}

/// Which signal asked the shop to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopSignal {
    Interrupt,
    Terminate,
}

impl StopSignal {
    const fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        }
    }
}

#[cfg(unix)]
async fn terminated() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(())
}

#[cfg(windows)]
async fn terminated() -> Result<(), ShutdownSignalError> {
    signal::windows::ctrl_close()
        .map_err(ShutdownSignalError::Close)?
        .recv()
        .await;

    Ok(())
}

async fn wait() -> Result<StopSignal, ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => result
            .map(|()| StopSignal::Interrupt)
            .map_err(ShutdownSignalError::CtrlC),
        result = terminated() => result.map(|()| StopSignal::Terminate),
    }
}

/// Wait for a stop signal, then drain in-flight requests.
///
/// Sessions live only in memory, so every open cart is lost on stop.
pub(crate) async fn listen(
    handle: ServerHandle,
    sessions: Arc<SessionStore>,
) -> Result<(), ShutdownSignalError> {
    let stop = wait().await?;

    let open_sessions = sessions.len().await;
    info!(
        signal = stop.name(),
        open_sessions,
        "stopping server"
    );

    handle.stop_graceful(Some(DRAIN_TIMEOUT));

    Ok(())
}
