use std::fs::{self, File};

use serde::Serialize;
use termcolor::WriteColor;

use crate::build::BuildArtifact;
use crate::cli::output::Reporter;
use crate::compare::compare;
use crate::discovery::TestCase;
use crate::errors::CaseError;
use crate::exec::Executor;

/// The outcome of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    name: String,
    input_name: String,
    passed: bool,
    elapsed_ms: u64,
    reason: String,
}

impl Verdict {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// `"OK"` on pass, otherwise what went wrong.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn new(case: &TestCase, passed: bool, elapsed_ms: u64, reason: String) -> Self {
        Self {
            name: case.name.clone(),
            input_name: case.display_name(),
            passed,
            elapsed_ms,
            reason,
        }
    }

    fn failed(case: &TestCase, elapsed_ms: u64, error: CaseError) -> Self {
        Self::new(case, false, elapsed_ms, error.to_string())
    }
}

/// Texts that were compared, kept for the optional diff display.
struct Compared {
    expected: String,
    actual: String,
}

/// Executes one case and judges its output.
pub struct CaseRunner<'a, E: Executor> {
    executor: &'a E,
    tolerance: f64,
}

impl<'a, E: Executor> CaseRunner<'a, E> {
    pub fn new(executor: &'a E, tolerance: f64) -> Self {
        Self {
            executor,
            tolerance,
        }
    }

    /// Runs `case` against `artifact` and writes its status row to `reporter`.
    pub fn run<W: WriteColor>(
        &self,
        artifact: &BuildArtifact,
        case: &TestCase,
        reporter: &mut Reporter<W>,
    ) -> Verdict {
        let (verdict, compared) = self.judge(artifact, case);
        reporter.case(&verdict);
        if let (false, Some(c)) = (verdict.passed(), compared) {
            reporter.diff(&c.expected, &c.actual);
        }
        verdict
    }

    fn judge(&self, artifact: &BuildArtifact, case: &TestCase) -> (Verdict, Option<Compared>) {
        let input = match File::open(&case.input) {
            Ok(f) => f,
            Err(source) => {
                let error = CaseError::InputUnreadable {
                    path: case.input.clone(),
                    source,
                };
                return (Verdict::failed(case, 0, error), None);
            }
        };

        let execution = match self.executor.execute(artifact.path(), input) {
            Ok(execution) => execution,
            Err(source) => {
                let error = CaseError::Launch {
                    artifact: artifact.path().to_path_buf(),
                    input: case.input.clone(),
                    source,
                };
                return (Verdict::failed(case, 0, error), None);
            }
        };
        let elapsed_ms = execution.elapsed_ms();
        log::debug!(
            "{}: exit code {:?} after {}ms",
            case.name,
            execution.exit_code,
            elapsed_ms
        );

        if execution.timed_out {
            let error = CaseError::TimedOut { elapsed_ms };
            return (Verdict::failed(case, elapsed_ms, error), None);
        }

        let expected = match fs::read_to_string(&case.expected) {
            Ok(text) => text,
            Err(source) => {
                let error = CaseError::expected(case.expected.clone(), source);
                return (Verdict::failed(case, elapsed_ms, error), None);
            }
        };

        let result = compare(&expected, &execution.stdout, self.tolerance);
        let verdict = Verdict::new(case, result.is_equal(), elapsed_ms, result.reason());
        let compared = Compared {
            expected,
            actual: execution.stdout,
        };
        (verdict, Some(compared))
    }
}
