//! Diagnostics on stderr via tracing. stdout carries command output only.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Pick the default level from the global flags. `--quiet` wins.
pub fn default_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flags.
pub fn init(quiet: bool, verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(quiet, verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
