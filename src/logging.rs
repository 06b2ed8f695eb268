//! Diagnostic logging to standard error.
//!
//! Progress lines are not log records; they go to standard output through
//! [`SequentialRunner`](crate::SequentialRunner). The logger only carries
//! diagnostics such as resolved program paths and spawn failures.

use anyhow::{Context, Result};
use log::LevelFilter;

/// Level used by the binary: quiet unless something unusual happens.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Install a global logger writing `<pid> [<LEVEL>] <target>: <message>` lines to stderr.
///
/// Fails if a logger has already been installed in this process.
pub fn init_logger(level: LevelFilter) -> Result<()> {
    let pid = std::process::id();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("failed to install logger")
}
