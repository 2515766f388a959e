//! The `decaf-runner` command-line interface.
//!
//! Resolves the layered configuration, runs the batch and turns the summary
//! into an exit status.

use std::process::ExitCode;

use clap::Parser;

use crate::cli::args::RunnerArgs;
use crate::config::{ConfigFile, RunnerConfig, DEFAULT_CONFIG_FILE};
use crate::errors::Result;
use crate::report::Reporter;
use crate::runner::Runner;

pub mod args;

/// The main entry point for the CLI.
pub fn run() -> Result<ExitCode> {
    let args = RunnerArgs::parse();
    execute(&args)
}

/// Runs the batch described by `args`.
pub fn execute(args: &RunnerArgs) -> Result<ExitCode> {
    let config = resolve_config(args)?;
    let width = config.width;
    let runner = Runner::new(&args.dir, config)?.verbose(args.verbose);
    let mut reporter = Reporter::stdout(width, args.color).with_diff(args.diff);

    let summary = runner.run(&args.names, &mut reporter)?;

    if args.strict && summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Defaults < config file < command-line options.
pub fn resolve_config(args: &RunnerArgs) -> Result<RunnerConfig> {
    let file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_optional(&args.dir.join(DEFAULT_CONFIG_FILE))?,
    };
    Ok(RunnerConfig::from_file(file.merge(args.overrides())))
}
