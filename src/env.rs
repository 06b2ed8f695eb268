use std::env as stdenv;
use std::ffi::OsString;
use std::path::PathBuf;

/// Snapshot of the parts of the process environment used to launch commands.
///
/// - `search_paths`: the raw `PATH` value used to resolve bare program names.
/// - `current_dir`: the working directory children are started in.
#[derive(Debug, Clone)]
pub struct Environment {
    pub search_paths: OsString,
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture `PATH` and the working directory of the current process.
    ///
    /// A missing `PATH` yields an empty search list; an unreadable working
    /// directory falls back to `.`.
    pub fn capture() -> Self {
        let search_paths = stdenv::var_os("PATH").unwrap_or_default();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            search_paths,
            current_dir,
        }
    }
}
