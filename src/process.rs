//! Blocking invocation of external collaborators with combined output
//! captured into a file.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::config::Tool;
use crate::errors::{Result, RunnerError};

/// Creates (or truncates) `path`, creating its parent directory if needed.
pub fn create_capture(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RunnerError::output(parent, e))?;
    }
    File::create(path).map_err(|e| RunnerError::output(path, e))
}

/// Runs `tool` with `extra` appended to its arguments, inside `cwd`, with
/// stdout and stderr both written to `capture` (relative to `cwd`).
///
/// Waits for the child to exit; there is no timeout.
pub fn run_captured(
    tool: &Tool,
    extra: &[&OsStr],
    cwd: &Path,
    capture: &Path,
) -> Result<ExitStatus> {
    let capture_path = cwd.join(capture);
    let stdout = create_capture(&capture_path)?;
    let stderr = stdout
        .try_clone()
        .map_err(|e| RunnerError::output(&capture_path, e))?;

    Command::new(&tool.program)
        .args(&tool.args)
        .args(extra)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .status()
        .map_err(|e| RunnerError::spawn(&tool.program, e))
}

/// Renders a command line for verbose tracing.
pub fn display_command(tool: &Tool, extra: &[&OsStr]) -> String {
    let mut parts = vec![tool.program.display().to_string()];
    parts.extend(tool.args.iter().cloned());
    parts.extend(extra.iter().map(|s| s.to_string_lossy().into_owned()));
    parts.join(" ")
}
