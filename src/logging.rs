//! Log subscriber setup for the command-line binary.

use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "microgrid_sim=debug" } else { "info" }
}

/// Installs a stderr fmt subscriber filtered by `RUST_LOG`.
///
/// `verbose` raises this crate to debug when `RUST_LOG` is unset. Calling
/// this more than once is harmless; later calls leave the first subscriber
/// in place.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
