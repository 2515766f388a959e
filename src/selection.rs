//! Selection resolution: which test cases a batch runs, and in what order.

use std::path::Path;

use walkdir::WalkDir;

use crate::case::TestCase;
use crate::config::RunnerConfig;
use crate::errors::{Result, RunnerError};

/// Candidate identifiers before extension filtering.
///
/// Explicit names are used verbatim and in the given order. Without them,
/// every entry directly inside `dir` is listed, sorted, and stripped of the
/// excluded names.
pub fn candidate_names(explicit: &[String], dir: &Path, exclude: &[String]) -> Result<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| RunnerError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;
        // A name that is not UTF-8 cannot be passed on verbatim, so it is skipped.
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    names.retain(|name| !exclude.contains(name));
    Ok(names)
}

/// Resolves the selection into test cases, silently dropping candidates
/// without the source extension.
pub fn resolve(explicit: &[String], dir: &Path, config: &RunnerConfig) -> Result<Vec<TestCase>> {
    let cases = candidate_names(explicit, dir, &config.exclude)?
        .iter()
        .filter_map(|name| TestCase::from_name(name, config))
        .collect();
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use std::fs;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "").unwrap();
        }
    }

    #[test]
    fn explicit_names_bypass_discovery_and_exclusion() {
        let config = RunnerConfig::for_mode(Mode::TwoStage);
        let explicit = vec![
            "z.decaf".to_string(),
            "blackjack.decaf".to_string(),
            "b.txt".to_string(),
            "a.decaf".to_string(),
        ];
        let cases = resolve(&explicit, Path::new("/does/not/exist"), &config).unwrap();
        let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["z.decaf", "blackjack.decaf", "a.decaf"]);
    }

    #[test]
    fn discovery_sorts_filters_and_excludes() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &["c.decaf", "a.decaf", "notes.txt", "blackjack.decaf", "B.decaf"],
        );
        fs::create_dir(dir.path().join("result")).unwrap();

        let config = RunnerConfig::for_mode(Mode::TwoStage);
        let cases = resolve(&[], dir.path(), &config).unwrap();
        let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B.decaf", "a.decaf", "c.decaf"]);
    }

    #[test]
    fn discovery_does_not_descend() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), &["deep.decaf"]);
        touch(dir.path(), &["top.decaf"]);

        let names = candidate_names(&[], dir.path(), &[]).unwrap();
        assert_eq!(names, ["sub", "top.decaf"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["ok.decaf"]);
        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.decaf")), "").unwrap();

        let names = candidate_names(&[], dir.path(), &[]).unwrap();
        assert_eq!(names, ["ok.decaf"]);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let err = candidate_names(&[], Path::new("/no/such/suite/dir"), &[]).unwrap_err();
        assert!(matches!(err, RunnerError::Discovery { .. }));
    }
}
