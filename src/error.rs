use crate::command::{Command, ExitCode};
use thiserror::Error;

/// Failure of a build run.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A step exited with a non-zero status. The run stops here.
    #[error("Command {command} failed with exit code {code}.")]
    StepFailed { command: Command, code: ExitCode },
}

impl BuildError {
    /// Exit code the whole process should terminate with.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BuildError::StepFailed { code, .. } => *code,
        }
    }
}
