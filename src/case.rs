use std::path::{Path, PathBuf};

use crate::config::{RunnerConfig, SOURCE_EXTENSION};

/// A single test case: one `.decaf` source and the files derived from it.
///
/// All paths are relative to the test directory, which is also the working
/// directory of every collaborator process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// The identifier exactly as selected; printed in the report.
    pub name: String,
    /// `name` without the source extension. Directory components are kept,
    /// so `nested/a.decaf` captures into `output/nested/a.result`.
    pub base_name: String,
    pub source: PathBuf,
    pub reference: PathBuf,
    pub captured: PathBuf,
    pub intermediate: PathBuf,
}

impl TestCase {
    /// Returns `None` when `name` does not carry the source extension.
    pub fn from_name(name: &str, config: &RunnerConfig) -> Option<Self> {
        let path = Path::new(name);
        if !has_source_extension(path) {
            return None;
        }
        let base_name = path.with_extension("").to_str()?.to_string();
        let result_file = format!("{base_name}.result");
        Some(Self {
            name: name.to_string(),
            source: path.to_path_buf(),
            reference: config.result_dir.join(&result_file),
            captured: config.output_dir.join(&result_file),
            intermediate: config
                .output_dir
                .join(format!("{base_name}.{}", config.intermediate_extension)),
            base_name,
        })
    }
}

/// True for `foo.decaf`, false for `foo.txt`, `foo` and the dotfile `.decaf`.
pub fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
