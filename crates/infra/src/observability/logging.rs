//! Tracing subscriber setup.

use presensi_domain::{PresensiError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `default_filter` applies when `RUST_LOG` is unset (e.g.
/// `"presensi_infra=info"`). With `json` set, log lines are structured JSON.
///
/// # Errors
///
/// `PresensiError::Internal` if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry().with(env_filter).with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| PresensiError::Internal(format!("tracing already initialised: {e}")))
}
