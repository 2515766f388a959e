//! The collaborator pipeline a test case is pushed through.
//!
//! Both suites share one driver: a single-stage pipeline captures the
//! compiler's own output, a two-stage pipeline hands the compiler's TAC to the
//! simulator and captures that instead.

use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitStatus;

use crate::case::TestCase;
use crate::config::{Mode, RunnerConfig, Tool};
use crate::errors::Result;
use crate::process::{create_capture, display_command, run_captured};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pipeline {
    SingleStage {
        compiler: Tool,
        flag: String,
    },
    TwoStage {
        compiler: Tool,
        flag: String,
        simulator: Tool,
    },
}

/// One external command that was run for a case.
#[derive(Debug, Clone)]
pub struct Step {
    pub command: String,
    pub status: ExitStatus,
}

/// What happened while executing a case, in order.
#[derive(Debug, Clone, Default)]
pub struct Execution {
    pub steps: Vec<Step>,
    /// Set when the compiler failed and the simulator was skipped.
    pub simulation_skipped: bool,
}

impl Pipeline {
    /// Builds the pipeline for `config`, anchoring path-like tools at `dir`.
    pub fn from_config(config: &RunnerConfig, dir: &Path) -> Self {
        let compiler = config.compiler.resolved_in(dir);
        let flag = config.flag.clone();
        match config.mode {
            Mode::Single => Pipeline::SingleStage { compiler, flag },
            Mode::TwoStage => Pipeline::TwoStage {
                compiler,
                flag,
                simulator: config.simulator.resolved_in(dir),
            },
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Pipeline::SingleStage { .. } => Mode::Single,
            Pipeline::TwoStage { .. } => Mode::TwoStage,
        }
    }

    /// Runs the collaborators for `case` inside `dir`, leaving the comparable
    /// text in `case.captured`.
    pub fn execute(&self, case: &TestCase, dir: &Path) -> Result<Execution> {
        let mut execution = Execution::default();
        match self {
            Pipeline::SingleStage { compiler, flag } => {
                let args = [OsStr::new(flag), case.source.as_os_str()];
                let status = run_captured(compiler, &args, dir, &case.captured)?;
                execution.record(compiler, &args, status);
            }
            Pipeline::TwoStage {
                compiler,
                flag,
                simulator,
            } => {
                let args = [OsStr::new(flag), case.source.as_os_str()];
                let status = run_captured(compiler, &args, dir, &case.intermediate)?;
                execution.record(compiler, &args, status);

                if status.success() {
                    let args = [case.intermediate.as_os_str()];
                    let status = run_captured(simulator, &args, dir, &case.captured)?;
                    execution.record(simulator, &args, status);
                } else {
                    // An old result must not be compared against.
                    create_capture(&dir.join(&case.captured))?;
                    execution.simulation_skipped = true;
                }
            }
        }
        Ok(execution)
    }
}

impl Execution {
    fn record(&mut self, tool: &Tool, args: &[&OsStr], status: ExitStatus) {
        self.steps.push(Step {
            command: display_command(tool, args),
            status,
        });
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;

    fn script(dir: &Path, name: &str, body: &str) -> Tool {
        fs::write(dir.join(name), format!("{body}\n")).unwrap();
        Tool::new("sh").with_args([name])
    }

    fn two_stage(dir: &Path, compiler: &str, simulator: &str) -> Pipeline {
        let mut config = RunnerConfig::for_mode(Mode::TwoStage);
        config.compiler = script(dir, "decaf", compiler);
        config.simulator = script(dir, "sim", simulator);
        Pipeline::from_config(&config, dir)
    }

    #[test]
    fn single_stage_passes_flag_and_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RunnerConfig::default();
        config.compiler = script(dir.path(), "decaf", r#"echo "$1 $2"; exit 7"#);
        let pipeline = Pipeline::from_config(&config, dir.path());
        let case = TestCase::from_name("foo.decaf", &config).unwrap();

        let execution = pipeline.execute(&case, dir.path()).unwrap();

        assert_eq!(execution.steps.len(), 1);
        assert_eq!(execution.steps[0].status.code(), Some(7));
        let captured = fs::read_to_string(dir.path().join("output/foo.result")).unwrap();
        assert_eq!(captured, "-l foo.decaf\n");
    }

    #[test]
    fn two_stage_feeds_intermediate_to_simulator() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = two_stage(dir.path(), r#"echo "tac for $2""#, r#"echo "ran $1"; cat "$1""#);
        let config = RunnerConfig::for_mode(Mode::TwoStage);
        let case = TestCase::from_name("foo.decaf", &config).unwrap();

        let execution = pipeline.execute(&case, dir.path()).unwrap();

        assert!(!execution.simulation_skipped);
        assert_eq!(execution.steps.len(), 2);
        let tac = fs::read_to_string(dir.path().join("output/foo.tac")).unwrap();
        assert_eq!(tac, "tac for foo.decaf\n");
        let captured = fs::read_to_string(dir.path().join("output/foo.result")).unwrap();
        assert_eq!(captured, "ran output/foo.tac\ntac for foo.decaf\n");
    }

    #[test]
    fn failing_compiler_skips_simulator_and_empties_capture() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = two_stage(dir.path(), "echo 'syntax error'; exit 1", "touch sim-called");
        let config = RunnerConfig::for_mode(Mode::TwoStage);
        let case = TestCase::from_name("foo.decaf", &config).unwrap();
        fs::create_dir(dir.path().join("output")).unwrap();
        fs::write(dir.path().join("output/foo.result"), "stale").unwrap();

        let execution = pipeline.execute(&case, dir.path()).unwrap();

        assert!(execution.simulation_skipped);
        assert_eq!(execution.steps.len(), 1);
        assert!(!dir.path().join("sim-called").exists());
        let captured = fs::read_to_string(dir.path().join("output/foo.result")).unwrap();
        assert!(captured.is_empty());
    }
}
