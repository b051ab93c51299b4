//! Tracing subscriber setup

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` with `--debug`
/// and `warn` without.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    // A subscriber may already be installed (tests)
    let _ = subscriber.try_init();
}
