//! Runner configuration.
//!
//! Settings are layered: per-mode defaults, then an optional YAML file, then
//! command-line overrides. [`ConfigFile`] mirrors the YAML keys with every
//! field optional; [`RunnerConfig`] is the fully resolved result.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::errors::{Result, RunnerError};

/// Extension (without the dot) that marks a directory entry as a test case.
pub const SOURCE_EXTENSION: &str = "decaf";

/// Config file looked up in the test directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "runner.yaml";

/// Compiler location relative to a suite directory such as `testcases/s1`.
pub const DEFAULT_COMPILER: &str = "../../target/release/decaf";

pub const DEFAULT_RESULT_DIR: &str = "result";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_INTERMEDIATE_EXTENSION: &str = "tac";

/// Cases the two-stage suite never runs during discovery.
pub const TWO_STAGE_EXCLUDED: &[&str] = &["blackjack.decaf"];

/// Which collaborator pipeline each case goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Compiler output is the result.
    #[default]
    Single,
    /// Compiler emits TAC, the simulator's output is the result.
    TwoStage,
}

impl Mode {
    pub fn default_flag(self) -> &'static str {
        match self {
            Mode::Single => "-l",
            Mode::TwoStage => "-t",
        }
    }

    pub fn default_width(self) -> usize {
        match self {
            Mode::Single => 30,
            Mode::TwoStage => 20,
        }
    }

    pub fn default_exclude(self) -> Vec<String> {
        match self {
            Mode::Single => Vec::new(),
            Mode::TwoStage => TWO_STAGE_EXCLUDED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Spelled the way `--mode` and the `mode` key accept it.
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

/// An external program plus the arguments that always precede the
/// per-case ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tool {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Tool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The TAC simulator shipped with the course material.
    pub fn default_simulator() -> Self {
        Tool::new("java").with_args(["-jar", "tac.jar"])
    }

    /// Anchors path-like programs at `dir`. Bare names are left for `PATH`
    /// lookup.
    pub fn resolved_in(&self, dir: &Path) -> Tool {
        let is_path = self.program.is_relative() && self.program.components().count() > 1;
        let program = if is_path {
            dir.join(&self.program)
        } else {
            self.program.clone()
        };
        Tool {
            program,
            args: self.args.clone(),
        }
    }
}

/// The YAML config file as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub mode: Option<Mode>,
    pub compiler: Option<PathBuf>,
    pub compiler_args: Option<Vec<String>>,
    pub flag: Option<String>,
    pub simulator: Option<Tool>,
    pub exclude: Option<Vec<String>>,
    pub width: Option<usize>,
    pub result_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub intermediate_extension: Option<String>,
}

impl ConfigFile {
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| RunnerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, failing if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| RunnerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Reads `path` if present, otherwise returns an empty config.
    pub fn load_optional(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlays `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            mode: other.mode.or(self.mode),
            compiler: other.compiler.or(self.compiler),
            compiler_args: other.compiler_args.or(self.compiler_args),
            flag: other.flag.or(self.flag),
            simulator: other.simulator.or(self.simulator),
            exclude: other.exclude.or(self.exclude),
            width: other.width.or(self.width),
            result_dir: other.result_dir.or(self.result_dir),
            output_dir: other.output_dir.or(self.output_dir),
            intermediate_extension: other.intermediate_extension.or(self.intermediate_extension),
        }
    }
}

/// Fully resolved settings for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub mode: Mode,
    pub compiler: Tool,
    pub flag: String,
    pub simulator: Tool,
    pub exclude: Vec<String>,
    pub width: usize,
    pub result_dir: PathBuf,
    pub output_dir: PathBuf,
    pub intermediate_extension: String,
}

impl RunnerConfig {
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            mode,
            compiler: Tool::new(DEFAULT_COMPILER),
            flag: mode.default_flag().to_string(),
            simulator: Tool::default_simulator(),
            exclude: mode.default_exclude(),
            width: mode.default_width(),
            result_dir: PathBuf::from(DEFAULT_RESULT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            intermediate_extension: DEFAULT_INTERMEDIATE_EXTENSION.to_string(),
        }
    }

    /// Fills every unset field from the defaults of the chosen mode.
    pub fn from_file(file: ConfigFile) -> Self {
        let base = Self::for_mode(file.mode.unwrap_or_default());
        let compiler = Tool {
            program: file.compiler.unwrap_or(base.compiler.program),
            args: file.compiler_args.unwrap_or(base.compiler.args),
        };
        Self {
            mode: base.mode,
            compiler,
            flag: file.flag.unwrap_or(base.flag),
            simulator: file.simulator.unwrap_or(base.simulator),
            exclude: file.exclude.unwrap_or(base.exclude),
            width: file.width.unwrap_or(base.width),
            result_dir: file.result_dir.unwrap_or(base.result_dir),
            output_dir: file.output_dir.unwrap_or(base.output_dir),
            intermediate_extension: file
                .intermediate_extension
                .unwrap_or(base.intermediate_extension),
        }
    }

    /// Rejects layouts where a capture would land on a reference file or on
    /// the simulator's own input.
    pub fn check(&self) -> Result<()> {
        if same_dir(&self.output_dir, &self.result_dir) {
            return Err(RunnerError::config(format!(
                "output directory '{}' is the reference directory",
                self.output_dir.display()
            )));
        }
        if self.intermediate_extension == "result" {
            return Err(RunnerError::config(
                "intermediate extension 'result' collides with the captured output",
            ));
        }
        Ok(())
    }
}

/// Lexical comparison ignoring `.` components, so `./result` equals `result`.
fn same_dir(a: &Path, b: &Path) -> bool {
    fn significant(path: &Path) -> Vec<Component<'_>> {
        path.components()
            .filter(|c| *c != Component::CurDir)
            .collect()
    }
    significant(a) == significant(b)
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::for_mode(Mode::default())
    }
}
