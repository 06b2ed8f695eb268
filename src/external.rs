use crate::command::{Command, CommandRunner, ExitCode};
use crate::env::Environment;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Runs commands as child processes of the current process.
///
/// The child inherits stdin, stdout and stderr, so its output goes straight to
/// the terminal. Programs are resolved through the captured [`Environment`]
/// before spawning.
pub struct ProcessRunner {
    env: Environment,
}

impl ProcessRunner {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Environment::capture())
    }
}

impl CommandRunner for ProcessRunner {
    fn execute(&mut self, command: &Command) -> io::Result<ExitCode> {
        let program = Path::new(command.program());
        let executable =
            find_command_path(&self.env.search_paths, program).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("command not found: {}", command.program()),
                )
            })?;
        log::debug!(
            "spawning {} with args {:?} in {}",
            executable.display(),
            command.args(),
            self.env.current_dir.display()
        );

        let mut child = std::process::Command::new(&*executable)
            .args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .current_dir(&self.env.current_dir)
            .spawn()?;
        let exit_status = child.wait()?;
        match exit_status.code() {
            Some(x) => Ok(x),
            None => {
                let code = terminated_by_signal(exit_status);
                log::warn!("{} was terminated by a signal ({})", command, exit_status);
                Ok(code)
            }
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a program path the way a typical shell would.
///
/// - Absolute path: returned if it exists.
/// - `./foo` (or any existing relative path on non-Unix): returned as is.
/// - Single component, e.g. `npm`: first executable match in `search_paths`.
/// - Several components, e.g. `node_modules/.bin/vsce`: returned if it exists.
/// - Empty path: `None`.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(x), None) => find_in_path(search_paths, x.as_os_str()).map(Cow::Owned),
        _ => find_by_path(path).map(Cow::Borrowed),
    }
}

fn find_in_path(search_paths: &OsStr, program: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if path.exists() { Some(path) } else { None }
}
