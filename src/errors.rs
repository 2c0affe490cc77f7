//! Verdict error types.
//!
//! Two families, propagated differently:
//! - [`JudgeError`] is fatal. It aborts the whole run before or instead of a report.
//! - [`CaseError`] is local to one case. It is folded into a failing
//!   [`Verdict`](crate::runner::Verdict) and the suite keeps going.
//!
//! Comparator mismatches are neither; see [`Mismatch`](crate::compare::Mismatch).

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use miette::Diagnostic;
use thiserror::Error;

/// Suite-level failures. Each one ends the run with exit status 1.
#[derive(Debug, Error, Diagnostic)]
pub enum JudgeError {
    #[error("{} is not a directory", path.display())]
    #[diagnostic(code(verdict::setup::folder))]
    FolderNotFound { path: PathBuf },

    #[error("{} not found", path.display())]
    #[diagnostic(
        code(verdict::setup::source),
        help("pass --source if the program is not named main.cpp")
    )]
    SourceNotFound { path: PathBuf },

    #[error("{} not found", path.display())]
    #[diagnostic(code(verdict::setup::tests))]
    TestsDirNotFound { path: PathBuf },

    #[error("compiler '{program}' could not be started: {source}")]
    #[diagnostic(
        code(verdict::build::launch),
        help("pass --compiler to use a different compiler")
    )]
    CompilerLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("compilation of {} failed ({status})", source_path.display())]
    #[diagnostic(code(verdict::build::failed))]
    BuildFailed {
        source_path: PathBuf,
        status: ExitStatus,
    },

    #[error("No .{extension} files found in {}", dir.display())]
    #[diagnostic(code(verdict::discovery::empty))]
    NoTestCases { dir: PathBuf, extension: String },

    #[error("failed to walk {}: {source}", dir.display())]
    #[diagnostic(code(verdict::discovery::walk))]
    Discovery {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write report to {}: {source}", path.display())]
    #[diagnostic(code(verdict::report::write))]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JudgeError {
    /// Fatal errors always map to the same exit status as a failing suite.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Per-case failures that never abort the suite.
#[derive(Debug, Error, Diagnostic)]
pub enum CaseError {
    #[error("Cannot open input file {}: {source}", path.display())]
    #[diagnostic(code(verdict::case::input))]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error running {} with {}: {source}", artifact.display(), input.display())]
    #[diagnostic(code(verdict::case::launch))]
    Launch {
        artifact: PathBuf,
        input: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Expected output file not found: {}", path.display())]
    #[diagnostic(code(verdict::case::expected_missing))]
    ExpectedMissing { path: PathBuf },

    #[error("Cannot read expected output file {}: {source}", path.display())]
    #[diagnostic(code(verdict::case::expected_unreadable))]
    ExpectedUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Time limit exceeded after {elapsed_ms}ms")]
    #[diagnostic(code(verdict::case::timeout))]
    TimedOut { elapsed_ms: u64 },
}

impl CaseError {
    /// Classifies a failed read of the expected-output file.
    pub fn expected(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return CaseError::ExpectedMissing { path };
        }
        CaseError::ExpectedUnreadable { path, source }
    }
}
