//! Command-line arguments for `decaf-runner`.
//!
//! Every option is optional; without any the runner behaves like the
//! single-stage suite script, run from inside the suite directory.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigFile, Mode, Tool};
use crate::report::ColorMode;

#[derive(Debug, Parser)]
#[command(
    name = "decaf-runner",
    version,
    about = "Runs decaf test cases through the compiler and compares the output with stored references."
)]
pub struct RunnerArgs {
    /// Test cases to run, e.g. `foo.decaf`. Without any, every `.decaf`
    /// file in the test directory is run.
    pub names: Vec<String>,

    /// Directory holding the sources plus `result/` and `output/`.
    #[arg(short = 'C', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Pipeline to run each case through.
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Compiler executable; relative paths are taken from the test directory.
    #[arg(long, value_name = "PATH")]
    pub compiler: Option<PathBuf>,

    /// Extra argument placed before the mode flag (repeatable).
    #[arg(long = "compiler-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub compiler_args: Vec<String>,

    /// Mode flag passed to the compiler (`-l` or `-t` by default).
    #[arg(long, value_name = "FLAG", allow_hyphen_values = true)]
    pub flag: Option<String>,

    /// Simulator program for the two-stage pipeline.
    #[arg(long, value_name = "PROGRAM")]
    pub simulator: Option<PathBuf>,

    /// Argument placed before the TAC path when invoking the simulator
    /// (repeatable).
    #[arg(
        long = "simulator-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        requires = "simulator"
    )]
    pub simulator_args: Vec<String>,

    /// Name skipped during directory discovery (repeatable). Replaces the
    /// mode's default exclusions.
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Drop the mode's default exclusions, e.g. to run `blackjack.decaf`
    /// in two-stage discovery.
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Width of the name column in the report.
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,

    /// YAML config file. Defaults to `runner.yaml` in the test directory,
    /// if present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Colour the status labels.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Show a line diff below each ERROR.
    #[arg(long)]
    pub diff: bool,

    /// Exit with status 1 unless every case is OK.
    #[arg(long)]
    pub strict: bool,

    /// Print each external command and its exit status to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunnerArgs {
    /// The options given on the command line, as a config layer.
    pub fn overrides(&self) -> ConfigFile {
        let simulator = self
            .simulator
            .as_ref()
            .map(|program| Tool::new(program).with_args(self.simulator_args.clone()));
        ConfigFile {
            mode: self.mode,
            compiler: self.compiler.clone(),
            compiler_args: non_empty(&self.compiler_args),
            flag: self.flag.clone(),
            simulator,
            exclude: if self.no_default_excludes {
                Some(self.exclude.clone())
            } else {
                non_empty(&self.exclude)
            },
            width: self.width,
            ..ConfigFile::default()
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}
