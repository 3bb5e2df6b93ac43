//! Logger setup for the binaries.
//!
//! The library only emits through the `log` facade. This installs a
//! `tracing-subscriber` formatter on stderr, whose `tracing-log` bridge picks
//! those records up. Stdout is left alone for the NDJSON harness.

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Installs the global stderr logger. `RUST_LOG` wins over `default_directive`.
///
/// Fails if a logger is already installed in this process.
pub fn init(default_directive: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
