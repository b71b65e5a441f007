//! Session Config

use std::time::Duration;

use clap::Args;

/// Session cookie and expiry settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "tienda_session")]
    pub session_cookie_name: String,

    /// Seconds of inactivity before a session and its cart are discarded
    #[arg(long, env = "SESSION_IDLE_TIMEOUT_SECONDS", default_value_t = 3_600_u64)]
    pub session_idle_timeout_seconds: u64,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,
}

impl SessionConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_seconds)
    }
}
