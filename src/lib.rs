//! Sequential build driver for packaging a VS Code extension.
//!
//! The crate runs a fixed list of external commands (install dependencies,
//! compile, package) one after another and stops at the first command that
//! exits with a non-zero status. That status becomes the exit status of the
//! whole run.
//!
//! The public modules [`command`] and [`plan`] expose the command model and
//! the fixed build plan. [`SequentialRunner`] drives any [`CommandRunner`],
//! and [`ProcessRunner`] is the implementation that spawns real processes.

pub mod command;
pub mod env;
pub mod error;
mod external;
pub mod logging;
pub mod plan;
mod runner;

pub use command::{Command, CommandRunner, ExitCode};
pub use error::BuildError;
pub use external::ProcessRunner;
pub use runner::SequentialRunner;
