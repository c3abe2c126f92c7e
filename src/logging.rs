//! Diagnostic logging
//!
//! stdout belongs to the monitoring framework, so everything here goes to
//! stderr. `RUST_LOG` overrides the level picked by the check.

use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// The level used when `RUST_LOG` isn't set
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the global subscriber
///
/// Safe to call more than once, later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level(verbose)).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
