use std::fmt;
use std::io;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// An external program invocation: the program name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    /// Create a command from a program name and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Renders the tokens separated by single spaces, e.g. `npm run compile`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Capability to run a [`Command`] to completion.
///
/// Implementations block until the command finishes and report its exit code.
/// The child shares the standard streams of the calling process.
/// An `Err` means the command could not be started at all.
pub trait CommandRunner {
    /// Run the command and wait for it to finish.
    fn execute(&mut self, command: &Command) -> io::Result<ExitCode>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn execute(&mut self, command: &Command) -> io::Result<ExitCode> {
        (**self).execute(command)
    }
}
