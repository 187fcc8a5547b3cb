//! Log subscriber setup for the binary
//!
//! Logs go to stderr; stdout carries only the per-notebook diagnostic lines.
//! The filter comes from the command line, never from the environment.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Filter directive for the workspace crates at `level`
#[must_use]
pub fn filter_for(level: Level) -> EnvFilter {
    let level = level.to_string().to_ascii_lowercase();
    EnvFilter::new(format!("warn,nborder_check={level},nborder_notebook={level}"))
}

/// Install the global stderr subscriber
///
/// Returns `false` if a subscriber was already installed.
pub fn init(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
