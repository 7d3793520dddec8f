//! Structured logging setup.
//!
//! The crate logs through `tracing` and never installs a subscriber on its
//! own. Applications usually install theirs; this helper is for binaries
//! and tests that just want `RUST_LOG`-driven output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: rejected requests only.
pub const DEFAULT_FILTER: &str = "u_timetable=warn";

/// Installs an env-filtered fmt subscriber if none is set yet.
///
/// Falls back to [`DEFAULT_FILTER`] when `RUST_LOG` is missing or invalid.
/// Safe to call more than once.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
