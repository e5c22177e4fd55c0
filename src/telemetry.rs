//! Tracing setup for the binaries

use std::sync::OnceLock;

use tracing::warn;
use tracing_subscriber::EnvFilter;

static INIT_GUARD: OnceLock<bool> = OnceLock::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let installed = *INIT_GUARD.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    });

    if !installed {
        warn!("tracing subscriber was already installed by someone else");
    }
}
