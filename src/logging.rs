//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with the combined output path
//! printed on stdout. `RUST_LOG` overrides the level chosen from `--verbose`.

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global fmt subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
