//! The fixed install → compile → package build plan.

use crate::command::{Command, CommandRunner};
use crate::error::BuildError;
use crate::runner::SequentialRunner;
use std::fmt;
use std::io::Write;

#[cfg(windows)]
const NPM: &str = "npm.cmd";
#[cfg(not(windows))]
const NPM: &str = "npm";

#[cfg(windows)]
const NPX: &str = "npx.cmd";
#[cfg(not(windows))]
const NPX: &str = "npx";

/// One stage of the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `npm install`
    Install,
    /// `npm run compile`
    Compile,
    /// `npx vsce package`
    Package,
}

impl Step {
    /// All steps in the order they run.
    pub const ALL: [Step; 3] = [Step::Install, Step::Compile, Step::Package];

    /// The external command that carries out this step.
    pub fn command(self) -> Command {
        match self {
            Step::Install => Command::new(NPM, ["install"]),
            Step::Compile => Command::new(NPM, ["run", "compile"]),
            Step::Package => Command::new(NPX, ["vsce", "package"]),
        }
    }

    /// The step that follows this one, `None` after packaging.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Install => Some(Step::Compile),
            Step::Compile => Some(Step::Package),
            Step::Package => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Install => "install",
            Step::Compile => "compile",
            Step::Package => "package",
        };
        f.write_str(name)
    }
}

/// Ordered list of steps that produces the `.vsix` package.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    steps: Vec<Step>,
}

impl Default for BuildPlan {
    fn default() -> Self {
        let mut steps = Vec::with_capacity(Step::ALL.len());
        let mut step = Some(Step::Install);
        while let Some(s) = step {
            steps.push(s);
            step = s.next();
        }
        Self { steps }
    }
}

impl BuildPlan {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, stopping at the first one that fails.
    ///
    /// Prints `VSIX package created successfully.` once all steps succeed.
    pub fn run<R: CommandRunner, W: Write>(
        &self,
        runner: &mut SequentialRunner<R, W>,
    ) -> Result<(), BuildError> {
        for step in &self.steps {
            log::debug!("starting {step} step");
            runner.run_command(&step.command())?;
        }
        runner.trace(format_args!("VSIX package created successfully."));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::tests::ScriptedRunner;

    fn run_with_codes(codes: &[i32]) -> (Result<(), BuildError>, Vec<Command>, String) {
        let mut scripted = ScriptedRunner::with_codes(codes);
        let mut out = Vec::new();
        let mut runner = SequentialRunner::new(&mut scripted, &mut out);
        let result = BuildPlan::default().run(&mut runner);
        drop(runner);
        (result, scripted.executed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn steps_run_in_fixed_order() {
        assert_eq!(
            BuildPlan::default().steps(),
            &[Step::Install, Step::Compile, Step::Package]
        );
        assert_eq!(BuildPlan::default().steps(), &Step::ALL);
    }

    #[test]
    fn step_commands() {
        assert_eq!(Step::Install.command(), Command::new(NPM, ["install"]));
        assert_eq!(Step::Compile.command(), Command::new(NPM, ["run", "compile"]));
        assert_eq!(Step::Package.command(), Command::new(NPX, ["vsce", "package"]));
    }

    #[test]
    fn all_steps_succeed() {
        let (result, executed, out) = run_with_codes(&[0, 0, 0]);
        assert!(result.is_ok());
        assert_eq!(executed.len(), 3);
        assert_eq!(out.matches("executed successfully.").count(), 3);
        assert!(out.ends_with("VSIX package created successfully.\n"));
    }

    #[test]
    fn compile_failure_skips_packaging() {
        let (result, executed, out) = run_with_codes(&[0, 2]);
        assert_eq!(result.unwrap_err().exit_code(), 2);
        assert_eq!(executed, vec![Step::Install.command(), Step::Compile.command()]);
        assert!(!out.contains("VSIX package created successfully."));
        assert!(!out.contains(&Step::Package.command().to_string()));
    }

    #[test]
    fn install_failure_stops_everything() {
        let (result, executed, out) = run_with_codes(&[1]);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(matches!(
            err,
            BuildError::StepFailed { ref command, .. } if *command == Step::Install.command()
        ));
        assert_eq!(executed, vec![Step::Install.command()]);
        assert!(!out.contains("VSIX package created successfully."));
    }

    #[test]
    fn failure_status_is_kept_verbatim() {
        let (result, _, _) = run_with_codes(&[0, 0, 137]);
        assert_eq!(result.unwrap_err().exit_code(), 137);
    }

    #[cfg(unix)]
    mod with_processes {
        use super::*;
        use crate::env::Environment;
        use crate::external::ProcessRunner;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};

        fn write_script(path: &Path, body: &str) {
            fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("write script");
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod 755");
        }

        /// Fake `npm`/`npx` in a fresh temp dir. `npm run compile` exits with
        /// `compile_status`, `npx` leaves a marker file behind.
        fn fake_toolchain(tag: &str, compile_status: i32) -> (PathBuf, PathBuf) {
            let dir = std::env::temp_dir().join(format!("plan_tests_{}_{tag}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).expect("create temp dir");
            let marker = dir.join("packaged");
            write_script(
                &dir.join("npm"),
                &format!("if [ \"$1\" = run ]; then exit {compile_status}; fi\nexit 0"),
            );
            write_script(
                &dir.join("npx"),
                &format!(": > '{}'\nexit 0", marker.display()),
            );
            (dir, marker)
        }

        fn run_in(dir: &Path) -> (Result<(), BuildError>, String) {
            let env = Environment {
                search_paths: dir.as_os_str().to_owned(),
                current_dir: dir.to_owned(),
            };
            let mut out = Vec::new();
            let mut runner = SequentialRunner::new(ProcessRunner::new(env), &mut out);
            let result = BuildPlan::default().run(&mut runner);
            drop(runner);
            (result, String::from_utf8(out).unwrap())
        }

        #[test]
        fn real_compile_failure_stops_before_packaging() {
            let (dir, marker) = fake_toolchain("fail", 2);
            let (result, out) = run_in(&dir);
            let packaged = marker.exists();
            let _ = fs::remove_dir_all(&dir);

            assert_eq!(result.unwrap_err().exit_code(), 2);
            assert!(!packaged, "npx must not run after a failed compile");
            assert!(out.contains("Error: Command npm run compile failed with exit code 2.\n"));
            assert!(!out.contains("VSIX package created successfully."));
        }

        #[test]
        fn real_tools_succeeding_produce_the_package() {
            let (dir, marker) = fake_toolchain("ok", 0);
            let (result, out) = run_in(&dir);
            let packaged = marker.exists();
            let _ = fs::remove_dir_all(&dir);

            assert!(result.is_ok());
            assert!(packaged);
            assert_eq!(out.matches("executed successfully.").count(), 3);
            assert!(out.ends_with("VSIX package created successfully.\n"));
        }
    }
}
