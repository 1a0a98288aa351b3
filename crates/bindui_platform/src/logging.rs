//! Logging setup for hosts and demos

use tracing_subscriber::EnvFilter;

use crate::error::{PlatformError, Result};

/// Install a `tracing` fmt subscriber
///
/// `RUST_LOG` wins over `default_directive` when set. Returns an error
/// rather than panicking when a global subscriber is already installed, so
/// hosts that set up their own logging can call this unconditionally.
pub fn init_logging(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| PlatformError::Logging(e.to_string()))
}
