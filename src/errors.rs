//! Runner error handling.
//!
//! Only failures that end the whole batch are errors. Per-case problems such as
//! a missing reference file or a failing compiler are outcomes, reported
//! through [`crate::compare::Verdict`] instead.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = RunnerError> = std::result::Result<T, E>;

/// Fatal runner failures.
#[derive(Error, Diagnostic, Debug)]
pub enum RunnerError {
    #[error("cannot access test directory '{}'", .path.display())]
    #[diagnostic(
        code(decaf_runner::dir::access),
        help("pass the directory holding the .decaf sources with --dir")
    )]
    TestDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list '{}'", .path.display())]
    #[diagnostic(code(decaf_runner::dir::list))]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot write '{}'", .path.display())]
    #[diagnostic(code(decaf_runner::output::write))]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write the report")]
    #[diagnostic(code(decaf_runner::report::write))]
    Report(#[source] io::Error),

    #[error("failed to launch '{}'", .program.display())]
    #[diagnostic(code(decaf_runner::process::spawn))]
    Spawn {
        program: PathBuf,
        #[help]
        help: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot read config file '{}'", .path.display())]
    #[diagnostic(code(decaf_runner::config::read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}'", .path.display())]
    #[diagnostic(
        code(decaf_runner::config::parse),
        help("every key is optional; see `decaf-runner --help` for the option names")
    )]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("conflicting settings: {reason}")]
    #[diagnostic(
        code(decaf_runner::config::conflict),
        help("captures must never overwrite references or their own input; change output_dir or intermediate_extension")
    )]
    Config { reason: String },
}

impl RunnerError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    pub(crate) fn spawn(program: impl Into<PathBuf>, source: io::Error) -> Self {
        let program = program.into();
        let help = if source.kind() == io::ErrorKind::NotFound {
            format!(
                "'{}' was not found; build it first or point --compiler/--simulator at it",
                program.display()
            )
        } else {
            "check that the program is executable".to_string()
        };
        Self::Spawn {
            program,
            help,
            source,
        }
    }
}
