use argh::FromArgs;
use std::process;
use vsix_build::logging::{self, DEFAULT_LEVEL};
use vsix_build::plan::BuildPlan;
use vsix_build::{ProcessRunner, SequentialRunner};

#[derive(FromArgs)]
/// Install dependencies, compile the extension and package it as a VSIX.
/// Stops at the first failing step and exits with its status.
struct Args {}

fn main() {
    let _args: Args = argh::from_env();

    if let Err(e) = logging::init_logger(DEFAULT_LEVEL) {
        eprintln!("vsix_build: {e:#}");
        process::exit(1);
    }

    let mut runner = SequentialRunner::new(ProcessRunner::default(), std::io::stdout());
    if let Err(e) = BuildPlan::default().run(&mut runner) {
        log::debug!("build stopped: {e}");
        process::exit(e.exit_code());
    }
}
