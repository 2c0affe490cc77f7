//! # Verdict Test Helpers
//!
//! Fixture folders plus in-process stand-ins for the compiler and the
//! subprocess, so the orchestrator can be driven without a toolchain.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use termcolor::Buffer;
use verdict::build::{BuildArtifact, Builder};
use verdict::cli::output::Reporter;
use verdict::exec::{Execution, Executor};
use verdict::suite::SuiteConfig;
use verdict::JudgeError;

/// A temporary folder laid out as `<root>/main.cpp` and `<root>/tests/`.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.cpp"), "int main() {}\n").unwrap();
        fs::create_dir(dir.path().join("tests")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.root().join("tests")
    }

    /// Adds `<name>.in` and, when given, `<name>.out`.
    pub fn case(&self, name: &str, input: &str, expected: Option<&str>) -> &Self {
        fs::write(self.tests_dir().join(format!("{}.in", name)), input).unwrap();
        if let Some(expected) = expected {
            fs::write(self.tests_dir().join(format!("{}.out", name)), expected).unwrap();
        }
        self
    }

    pub fn artifact(&self) -> PathBuf {
        self.root().join("program")
    }

    /// Default config with the artifact placed inside the fixture.
    pub fn config(&self) -> SuiteConfig {
        SuiteConfig {
            artifact_name: self.artifact().to_string_lossy().into_owned(),
            ..SuiteConfig::default()
        }
    }
}

/// Writes a placeholder artifact and records every build request.
#[derive(Default)]
pub struct FakeBuilder {
    pub fail: bool,
    pub builds: RefCell<Vec<PathBuf>>,
}

impl FakeBuilder {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Builder for FakeBuilder {
    fn build(&self, source: &Path, artifact: &Path) -> Result<BuildArtifact, JudgeError> {
        self.builds.borrow_mut().push(source.to_path_buf());
        if self.fail {
            return Err(JudgeError::CompilerLaunch {
                program: "fake".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such compiler"),
            });
        }
        fs::write(artifact, "#!fake").unwrap();
        Ok(BuildArtifact::new(artifact.to_path_buf()))
    }
}

/// Produces stdout from the input text with a plain function, standing in
/// for the compiled program. Records the inputs it saw, in order.
pub struct FnExecutor<F: Fn(&str) -> io::Result<String>> {
    pub program: F,
    pub seen: RefCell<Vec<String>>,
}

impl<F: Fn(&str) -> io::Result<String>> FnExecutor<F> {
    pub fn new(program: F) -> Self {
        Self {
            program,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl<F: Fn(&str) -> io::Result<String>> Executor for FnExecutor<F> {
    fn execute(&self, artifact: &Path, mut input: File) -> io::Result<Execution> {
        assert!(artifact.exists(), "artifact must exist while cases run");
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        self.seen.borrow_mut().push(text.clone());
        let stdout = (self.program)(&text)?;
        Ok(Execution {
            stdout,
            elapsed: Duration::from_millis(3),
            exit_code: Some(0),
            timed_out: false,
        })
    }
}

/// A program that echoes its input back.
pub fn echo() -> FnExecutor<impl Fn(&str) -> io::Result<String>> {
    FnExecutor::new(|input: &str| Ok(input.to_string()))
}

pub fn buffer_reporter() -> Reporter<Buffer> {
    Reporter::new(Buffer::no_color())
}

pub fn output_of(reporter: Reporter<Buffer>) -> String {
    String::from_utf8(reporter.into_inner().into_inner()).unwrap()
}
