//! Liveness probe.

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Liveness report: the process answers and the session store is reachable.
#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,

    /// Sessions currently held in memory.
    pub sessions: usize,
}

/// Sits outside the session middleware, so probing never starts a session.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Health>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(Health {
        status: "ok".to_owned(),
        sessions: state.app.sessions.len().await,
    }))
}
