//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV;

/// Filter directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// parseable; `TOKEN_LOG` overrides the verbosity flag.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
