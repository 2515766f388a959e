//! Scratch test suites with mock collaborators.
//!
//! Mocks are plain shell scripts run as `sh <script>`, so they never need the
//! executable bit.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const COMPILER: &str = "compiler.sh";
pub const SIMULATOR: &str = "simulator.sh";
/// Created by the mock simulator whenever it runs.
pub const SIMULATOR_MARKER: &str = "simulator-ran";

pub struct Suite {
    dir: TempDir,
}

impl Suite {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create suite dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, contents: &str) -> &Self {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write suite file");
        self
    }

    pub fn source(&self, name: &str) -> &Self {
        self.file(name, "class Main { static void main() { } }\n")
    }

    pub fn reference(&self, base: &str, contents: &str) -> &Self {
        self.file(&format!("result/{base}.result"), contents)
    }

    /// Mock compiler body; `$1` is the mode flag, `$2` the source file.
    pub fn compiler(&self, body: &str) -> &Self {
        self.file(COMPILER, body)
    }

    /// Mock simulator body; `$1` is the TAC file. Always leaves a marker.
    pub fn simulator(&self, body: &str) -> &Self {
        self.file(SIMULATOR, &format!("touch {SIMULATOR_MARKER}\n{body}"))
    }

    pub fn simulator_ran(&self) -> bool {
        self.path().join(SIMULATOR_MARKER).exists()
    }

    pub fn output(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path().join("output").join(name)).ok()
    }
}

/// Command-line arguments wiring the mocks in for `mode`.
pub fn mock_args(suite: &Suite, mode: &str) -> Vec<String> {
    let mut args = vec![
        "--color".to_string(),
        "never".to_string(),
        "-C".to_string(),
        suite.path().display().to_string(),
        "--mode".to_string(),
        mode.to_string(),
        "--compiler".to_string(),
        "sh".to_string(),
        "--compiler-arg".to_string(),
        COMPILER.to_string(),
    ];
    if mode == "two-stage" {
        args.extend(
            ["--simulator", "sh", "--simulator-arg", SIMULATOR]
                .iter()
                .map(|s| s.to_string()),
        );
    }
    args
}
