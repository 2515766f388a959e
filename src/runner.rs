//! The batch driver.
//!
//! Cases run strictly one after another: each case's collaborators, captures
//! and comparison finish before the next case starts, and report lines come
//! out in selection order.

use std::path::{Path, PathBuf};

use termcolor::WriteColor;

use crate::case::TestCase;
use crate::compare::{compare_files, Comparison};
use crate::config::RunnerConfig;
use crate::errors::{Result, RunnerError};
use crate::pipeline::{Execution, Pipeline};
use crate::report::{Reporter, Summary};
use crate::selection;

/// Everything known about one finished case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub case: TestCase,
    pub execution: Execution,
    pub comparison: Comparison,
}

#[derive(Debug)]
pub struct Runner {
    dir: PathBuf,
    config: RunnerConfig,
    pipeline: Pipeline,
    verbose: bool,
}

impl Runner {
    /// Prepares a batch rooted at `dir`, which must exist.
    pub fn new(dir: &Path, config: RunnerConfig) -> Result<Self> {
        config.check()?;
        let dir = dir.canonicalize().map_err(|source| RunnerError::TestDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let pipeline = Pipeline::from_config(&config, &dir);
        Ok(Self {
            dir,
            config,
            pipeline,
            verbose: false,
        })
    }

    /// Traces every external command to stderr.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn select(&self, explicit: &[String]) -> Result<Vec<TestCase>> {
        selection::resolve(explicit, &self.dir, &self.config)
    }

    /// Executes and compares one case. Only output and spawn failures are
    /// errors; everything else ends up in the verdict.
    pub fn run_case(&self, case: &TestCase) -> Result<CaseOutcome> {
        let execution = self.pipeline.execute(case, &self.dir)?;
        if self.verbose {
            for step in &execution.steps {
                eprintln!("[{}] {} ({})", case.name, step.command, step.status);
            }
            if execution.simulation_skipped {
                eprintln!("[{}] compiler failed, simulator skipped", case.name);
            }
        }
        let comparison = compare_files(
            &self.dir.join(&case.reference),
            &self.dir.join(&case.captured),
        );
        Ok(CaseOutcome {
            case: case.clone(),
            execution,
            comparison,
        })
    }

    /// Runs the whole selection, writing one report line per case as it
    /// finishes, then the summary.
    pub fn run<W: WriteColor>(
        &self,
        explicit: &[String],
        reporter: &mut Reporter<W>,
    ) -> Result<Summary> {
        let cases = self.select(explicit)?;
        if self.verbose {
            eprintln!(
                "running {} case(s) in {} ({} mode)",
                cases.len(),
                self.dir.display(),
                self.pipeline.mode()
            );
        }

        let mut summary = Summary::default();
        for case in &cases {
            let outcome = self.run_case(case)?;
            summary.record(outcome.comparison.verdict);
            reporter
                .case(&case.name, &outcome.comparison)
                .map_err(RunnerError::Report)?;
        }
        reporter.summary(&summary).map_err(RunnerError::Report)?;
        Ok(summary)
    }
}
