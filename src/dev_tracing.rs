//! Log output for demos and tests.
//!
//! The crate only emits `tracing` events. Binaries that want to see them
//! install a subscriber; this module has the one the demos and test suites
//! share.

use tracing_subscriber::EnvFilter;

/// Filter variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "ZMQ_CONTEXT_LOG";

/// Install a stderr subscriber filtered by `ZMQ_CONTEXT_LOG`, or by
/// `RUST_LOG` when that is unset.
///
/// Does nothing when neither variable is set, or when another subscriber
/// is already the global default, so calling it from every test is fine.
pub fn init_tracing() {
    let Some(filter) = filter_from_env() else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn filter_from_env() -> Option<EnvFilter> {
    [LOG_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .find_map(|var| EnvFilter::try_from_env(var).ok())
}
