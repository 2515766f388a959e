//! Reference comparison.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of comparing a captured result with its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Match,
    Mismatch,
    /// The reference or the captured output could not be read.
    MissingReference,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Match => "OK",
            Verdict::Mismatch => "ERROR",
            Verdict::MissingReference => "MISSING REFERENCE",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trims outer whitespace and drops every carriage return, so output
/// recorded with CRLF line endings compares equal to LF output.
pub fn normalize(text: &str) -> String {
    text.trim().replace('\r', "")
}

/// Reads a file as text for comparison. Invalid UTF-8 is replaced rather
/// than treated as unreadable.
pub fn read_normalized(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(normalize(&String::from_utf8_lossy(&bytes)))
}

/// Both sides of a comparison after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub verdict: Verdict,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// Compares `captured` against `reference`. Read failures on either side
/// yield [`Verdict::MissingReference`] and are never propagated.
pub fn compare_files(reference: &Path, captured: &Path) -> Comparison {
    let expected = read_normalized(reference).ok();
    let actual = read_normalized(captured).ok();
    let verdict = match (&expected, &actual) {
        (Some(e), Some(a)) if e == a => Verdict::Match,
        (Some(_), Some(_)) => Verdict::Mismatch,
        _ => Verdict::MissingReference,
    };
    Comparison {
        verdict,
        expected,
        actual,
    }
}
