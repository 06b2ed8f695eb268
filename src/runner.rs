use crate::command::{Command, CommandRunner, ExitCode};
use crate::error::BuildError;
use std::fmt;
use std::io::{self, Write};

/// Runs commands one at a time and stops at the first failure.
///
/// Progress is traced as plain lines on `out` (standard output in the binary).
/// The runner never exits the process itself: a failing step is returned as
/// [`BuildError::StepFailed`] and the caller decides how to terminate.
///
/// Example
/// ```
/// use std::io;
/// use vsix_build::{Command, CommandRunner, ExitCode, SequentialRunner};
///
/// struct AlwaysOk;
/// impl CommandRunner for AlwaysOk {
///     fn execute(&mut self, _: &Command) -> io::Result<ExitCode> {
///         Ok(0)
///     }
/// }
///
/// let mut out = Vec::new();
/// let mut runner = SequentialRunner::new(AlwaysOk, &mut out);
/// runner.run_command(&Command::new("npm", ["install"])).unwrap();
/// drop(runner);
/// assert!(String::from_utf8(out).unwrap().starts_with("Running command: npm install\n"));
/// ```
pub struct SequentialRunner<R, W> {
    runner: R,
    out: W,
}

impl<R: CommandRunner, W: Write> SequentialRunner<R, W> {
    pub fn new(runner: R, out: W) -> Self {
        Self { runner, out }
    }

    /// Run a single command to completion.
    ///
    /// Returns `Ok(())` if the command exited with 0. Otherwise prints an error
    /// line naming the command and its status and returns the status inside
    /// [`BuildError::StepFailed`].
    pub fn run_command(&mut self, command: &Command) -> Result<(), BuildError> {
        self.trace(format_args!("Running command: {command}"));
        // Children write to the same terminal.
        if let Err(e) = self.out.flush() {
            log::warn!("failed to flush trace output: {e}");
        }

        let code = match self.runner.execute(command) {
            Ok(code) => code,
            Err(e) => {
                log::error!("failed to start {command}: {e}");
                self.trace(format_args!("Error: {e}"));
                spawn_failure_code(&e)
            }
        };

        if code != 0 {
            let err = BuildError::StepFailed {
                command: command.clone(),
                code,
            };
            self.trace(format_args!("Error: {err}"));
            return Err(err);
        }

        self.trace(format_args!("Command {command} executed successfully.\n"));
        Ok(())
    }

    /// Write one line of progress output.
    pub(crate) fn trace(&mut self, line: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{line}") {
            log::warn!("failed to write trace output: {e}");
        }
    }
}

/// Status a POSIX shell reports when it cannot launch a command.
fn spawn_failure_code(err: &io::Error) -> ExitCode {
    match err.kind() {
        io::ErrorKind::NotFound => 127,
        io::ErrorKind::PermissionDenied => 126,
        _ => 1,
    }
}
