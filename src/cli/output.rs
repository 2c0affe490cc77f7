//! Handles all user-facing report output.
//!
//! Formatting is done by pure functions returning `String`s; [`Reporter`]
//! only decides colors and writes whole lines to a `termcolor` stream. The
//! stream, and with it the color choice, is set up once at startup.

use std::path::Path;

use difference::{Changeset, Difference};
use miette::Diagnostic;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::errors::JudgeError;
use crate::runner::Verdict;
use crate::suite::SuiteReport;

pub const PASS_TAG: &str = "[PASS]";
pub const FAIL_TAG: &str = "[FAIL]";
const TIME_WIDTH: usize = 6;

// ============================================================================
// FORMATTING
// ============================================================================

/// `1234` with width 6 becomes `" 1'234ms"`.
pub fn format_time(ms: u64, width: usize) -> String {
    format!("{:>width$}ms", group_thousands(ms), width = width)
}

pub fn header_line() -> String {
    format!("{:<8}{:>8}{:>12}", "Verdict", "Test", "Time")
}

pub fn row_line(verdict: &Verdict) -> String {
    let tag = if verdict.passed() { PASS_TAG } else { FAIL_TAG };
    format!(
        "{:<8}{:>8}{:>12}",
        tag,
        verdict.input_name(),
        format_time(verdict.elapsed_ms(), TIME_WIDTH)
    )
}

pub fn summary_line(report: &SuiteReport) -> String {
    let status = if report.all_passed() { "✅" } else { "❌" };
    format!(
        "Summary {}: {}/{} tests passed",
        status,
        report.passed(),
        report.total()
    )
}

/// `Error: <message>`, with the diagnostic help appended when there is one.
pub fn fatal_line(error: &JudgeError) -> String {
    match error.help() {
        Some(help) => format!("Error: {} (help: {})", error, help),
        None => format!("Error: {}", error),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\'');
        }
        out.push(c);
    }
    out
}

// ============================================================================
// REPORTER
// ============================================================================

/// Writes the run report, coloring pass lines green and fail lines red.
pub struct Reporter<W: WriteColor> {
    out: W,
    show_diff: bool,
}

impl<W: WriteColor> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_diff: false,
        }
    }

    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn compiling(&mut self, source: &Path, artifact: &Path) {
        self.plain(&format!(
            "Compiling {} -> {} ..",
            source.display(),
            artifact.display()
        ));
    }

    pub fn compiled(&mut self) {
        self.plain("Compilation successful ✅");
    }

    pub fn compile_failed(&mut self, reason: &dyn std::fmt::Display) {
        self.plain(&format!("Compilation failed ❌: {}", reason));
    }

    pub fn header(&mut self) {
        self.plain(&header_line());
    }

    /// One status row, followed by the reason when the case failed.
    pub fn case(&mut self, verdict: &Verdict) {
        self.colored(&row_line(verdict), verdict.passed());
        if !verdict.passed() {
            self.plain(verdict.reason());
        }
    }

    /// Line diff of expected vs actual output, only when diffs are enabled.
    pub fn diff(&mut self, expected: &str, actual: &str) {
        if !self.show_diff {
            return;
        }
        let changeset = Changeset::new(expected.trim_end(), actual.trim_end(), "\n");
        for diff in &changeset.diffs {
            match diff {
                Difference::Same(x) => {
                    let _ = self.out.reset();
                    for line in x.lines() {
                        let _ = writeln!(self.out, " {}", line);
                    }
                }
                Difference::Add(x) => {
                    let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                    for line in x.lines() {
                        let _ = writeln!(self.out, "+{}", line);
                    }
                }
                Difference::Rem(x) => {
                    let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                    for line in x.lines() {
                        let _ = writeln!(self.out, "-{}", line);
                    }
                }
            }
        }
        let _ = self.out.reset();
    }

    pub fn summary(&mut self, report: &SuiteReport) {
        self.plain("");
        self.colored(&summary_line(report), report.all_passed());
    }

    fn plain(&mut self, line: &str) {
        let _ = writeln!(self.out, "{}", line);
    }

    fn colored(&mut self, line: &str, ok: bool) {
        let color = if ok { Color::Green } else { Color::Red };
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = write!(self.out, "{}", line);
        let _ = self.out.reset();
        let _ = writeln!(self.out);
    }
}
