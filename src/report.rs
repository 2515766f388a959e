//! Per-case status lines, the batch summary, and optional diffs.

use std::io;

use clap::ValueEnum;
use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::compare::{Comparison, Verdict};

/// When to colour status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Left-aligns `name` in a column of `width` display cells. Longer names are
/// kept whole, so the label then follows immediately.
pub fn pad_name(name: &str, width: usize) -> String {
    let fill = width.saturating_sub(name.width());
    format!("{name}{}", " ".repeat(fill))
}

fn label_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Match => Color::Green,
        Verdict::Mismatch => Color::Red,
        Verdict::MissingReference => Color::Yellow,
    }
}

/// Verdict counts for a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub matched: usize,
    pub mismatched: usize,
    pub missing: usize,
}

impl Summary {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Match => self.matched += 1,
            Verdict::Mismatch => self.mismatched += 1,
            Verdict::MissingReference => self.missing += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.mismatched + self.missing
    }

    pub fn has_failures(&self) -> bool {
        self.matched != self.total()
    }
}

/// Writes the report to any colour-capable sink.
pub struct Reporter<W> {
    out: W,
    width: usize,
    show_diff: bool,
}

impl Reporter<StandardStream> {
    pub fn stdout(width: usize, color: ColorMode) -> Self {
        Self::new(StandardStream::stdout(color.choice()), width)
    }
}

impl<W: WriteColor> Reporter<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            show_diff: false,
        }
    }

    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    /// One line: padded identifier, then the status label.
    pub fn case(&mut self, name: &str, comparison: &Comparison) -> io::Result<()> {
        write!(self.out, "{}", pad_name(name, self.width))?;
        self.out
            .set_color(ColorSpec::new().set_fg(Some(label_color(comparison.verdict))).set_bold(true))?;
        write!(self.out, "{}", comparison.verdict.label())?;
        self.out.reset()?;
        writeln!(self.out)?;

        if self.show_diff && comparison.verdict == Verdict::Mismatch {
            if let (Some(expected), Some(actual)) = (&comparison.expected, &comparison.actual) {
                self.diff(expected, actual)?;
            }
        }
        self.out.flush()
    }

    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{} cases: {} ok, {} error, {} missing",
            summary.total(),
            summary.matched,
            summary.mismatched,
            summary.missing
        )?;
        self.out.flush()
    }

    fn diff(&mut self, expected: &str, actual: &str) -> io::Result<()> {
        let changeset = Changeset::new(expected, actual, "\n");
        for diff in &changeset.diffs {
            let (marker, color, text) = match diff {
                Difference::Same(x) => (' ', None, x),
                Difference::Rem(x) => ('-', Some(Color::Red), x),
                Difference::Add(x) => ('+', Some(Color::Green), x),
            };
            self.out.set_color(ColorSpec::new().set_fg(color))?;
            for line in text.lines() {
                writeln!(self.out, "    {marker} {line}")?;
            }
            self.out.reset()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
