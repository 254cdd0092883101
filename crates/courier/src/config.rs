//! Client configuration.

use std::time::Duration;

use crate::auth::AuthSchemes;

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default per-request timeout.
    ///
    /// Deliberately generous: callers that need a real bound pass a
    /// per-call deadline via
    /// [`CallOptions::with_deadline`](crate::CallOptions::with_deadline).
    pub timeout: Duration,

    /// Connection establishment timeout.
    pub connect_timeout: Duration,

    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,

    /// Authorization scheme registry.
    pub schemes: AuthSchemes,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60 * 60),
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
            schemes: AuthSchemes::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration overrides from the environment.
    ///
    /// Reads `COURIER_TIMEOUT_SECS` and `COURIER_CONNECT_TIMEOUT_SECS`;
    /// unset or unparsable variables leave the defaults in place. A `.env`
    /// file in the working directory is honored when present.
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(secs) = std::env::var("COURIER_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
        {
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(secs) = std::env::var("COURIER_CONNECT_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
        {
            config.connect_timeout = Duration::from_secs(secs);
        }

        config
    }
}
