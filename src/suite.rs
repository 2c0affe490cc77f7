//! Build once, run every case in order, and summarize.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::build::{artifact_path, Builder, CompilerBuilder, CompilerConfig};
use crate::cli::output::{fatal_line, Reporter};
use crate::discovery::discover_cases;
use crate::errors::JudgeError;
use crate::exec::{Executor, ProcessExecutor};
use crate::runner::{CaseRunner, Verdict};

/// Exit status when every case passed.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for a fatal error or any failing case.
pub const EXIT_FAILURE: i32 = 1;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Settings for one suite run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteConfig {
    pub tolerance: f64,
    pub artifact_name: String,
    pub source_name: String,
    pub tests_dir_name: String,
    pub input_extension: String,
    pub expected_extension: String,
    pub compiler: CompilerConfig,
    pub timeout: Option<Duration>,
    pub show_diff: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            artifact_name: "program".to_string(),
            source_name: "main.cpp".to_string(),
            tests_dir_name: "tests".to_string(),
            input_extension: "in".to_string(),
            expected_extension: "out".to_string(),
            compiler: CompilerConfig::default(),
            timeout: None,
            show_diff: false,
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Verdicts in the order the cases ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuiteReport {
    total: usize,
    passed: usize,
    verdicts: Vec<Verdict>,
}

impl SuiteReport {
    pub fn push(&mut self, verdict: Verdict) {
        self.total += 1;
        if verdict.passed() {
            self.passed += 1;
        }
        self.verdicts.push(verdict);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            EXIT_SUCCESS
        } else {
            EXIT_FAILURE
        }
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), JudgeError> {
        let write = || -> io::Result<()> {
            let mut out = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut out, self)?;
            writeln!(out)?;
            out.flush()
        };
        write().map_err(|source| JudgeError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Drives the build step and the case runner over a folder of cases.
pub struct Suite<B: Builder, E: Executor> {
    config: SuiteConfig,
    builder: B,
    executor: E,
}

impl Suite<CompilerBuilder, ProcessExecutor> {
    /// A suite backed by the configured compiler and real subprocesses.
    pub fn from_config(config: SuiteConfig) -> Self {
        let builder = CompilerBuilder::new(config.compiler.clone());
        let executor = ProcessExecutor::new(config.timeout);
        Self::new(config, builder, executor)
    }
}

impl<B: Builder, E: Executor> Suite<B, E> {
    pub fn new(config: SuiteConfig, builder: B, executor: E) -> Self {
        Self {
            config,
            builder,
            executor,
        }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Runs the suite for a folder holding the source file and the tests directory.
    pub fn run<W: WriteColor>(
        &self,
        folder: &Path,
        reporter: &mut Reporter<W>,
    ) -> Result<SuiteReport, JudgeError> {
        if !folder.is_dir() {
            return Err(JudgeError::FolderNotFound {
                path: folder.to_path_buf(),
            });
        }
        let source = folder.join(&self.config.source_name);
        let tests_dir = folder.join(&self.config.tests_dir_name);
        self.run_paths(&source, &tests_dir, reporter)
    }

    /// Runs the suite for an explicit source file and tests directory.
    pub fn run_paths<W: WriteColor>(
        &self,
        source: &Path,
        tests_dir: &Path,
        reporter: &mut Reporter<W>,
    ) -> Result<SuiteReport, JudgeError> {
        if !source.exists() {
            return Err(JudgeError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        if !tests_dir.is_dir() {
            return Err(JudgeError::TestsDirNotFound {
                path: tests_dir.to_path_buf(),
            });
        }

        let target = artifact_path(&self.config.artifact_name);
        reporter.compiling(source, &target);
        let artifact = match self.builder.build(source, &target) {
            Ok(artifact) => artifact,
            Err(e) => {
                reporter.compile_failed(&e);
                return Err(e);
            }
        };
        reporter.compiled();
        log::info!("artifact at {}", artifact.path().display());

        let cases = discover_cases(
            tests_dir,
            &self.config.input_extension,
            &self.config.expected_extension,
        )?;

        reporter.header();
        let runner = CaseRunner::new(&self.executor, self.config.tolerance);
        let mut report = SuiteReport::default();
        for case in &cases {
            report.push(runner.run(&artifact, case, reporter));
        }

        if let Err(e) = artifact.release() {
            log::warn!("could not remove artifact: {}", e);
        }

        reporter.summary(&report);
        Ok(report)
    }
}

/// Runs `source` against the cases in `tests_dir` with default settings apart
/// from `tolerance` and `artifact_name`, reporting to stdout. Returns the
/// process exit status.
pub fn run_suite(source: &Path, tests_dir: &Path, tolerance: f64, artifact_name: &str) -> i32 {
    let config = SuiteConfig {
        tolerance,
        artifact_name: artifact_name.to_string(),
        ..SuiteConfig::default()
    };
    let suite = Suite::from_config(config);
    let mut reporter = Reporter::new(StandardStream::stdout(ColorChoice::Auto));
    match suite.run_paths(source, tests_dir, &mut reporter) {
        Ok(report) => report.exit_code(),
        Err(e) => {
            eprintln!("{}", fatal_line(&e));
            e.exit_code()
        }
    }
}
