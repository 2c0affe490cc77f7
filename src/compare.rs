//! Tokenized, tolerance-aware comparison of program output.
//!
//! Both texts are split into lines and then into whitespace-delimited tokens.
//! Tokens that both read as decimal numbers are compared with a combined
//! relative/absolute tolerance; every other pair must match exactly. The first
//! difference found (top to bottom, left to right) is reported.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Decimal literal grammar accepted as numeric: optional sign, digits with an
/// optional fraction (or a bare fraction), optional exponent.
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric token grammar is a valid regex")
});

// ============================================================================
// TYPES
// ============================================================================

/// One token after the numeric attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    Number(f64),
    Text(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Self {
        match parse_number(raw) {
            Some(value) => Token::Number(value),
            None => Token::Text(raw),
        }
    }
}

/// The first difference between expected and actual output.
///
/// Line and token indices are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    LineCount {
        expected: usize,
        actual: usize,
    },
    TokenCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// Values are kept as written so the reason shows the tokens verbatim.
    Numeric {
        line: usize,
        token: usize,
        expected: String,
        actual: String,
        tolerance: f64,
    },
    Text {
        line: usize,
        token: usize,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::LineCount { expected, actual } => {
                write!(f, "Line count differs: expected {}, got {}", expected, actual)
            }
            Mismatch::TokenCount {
                line,
                expected,
                actual,
            } => write!(
                f,
                "Token count differs on line {}: expected {}, got {}",
                line, expected, actual
            ),
            Mismatch::Numeric {
                line,
                token,
                expected,
                actual,
                tolerance,
            } => write!(
                f,
                "Numeric mismatch at line {}, token {}: expected {}, got {} (tol={:?})",
                line, token, expected, actual, tolerance
            ),
            Mismatch::Text {
                line,
                token,
                expected,
                actual,
            } => write!(
                f,
                "String mismatch at line {}, token {}: expected '{}', got '{}'",
                line, token, expected, actual
            ),
        }
    }
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    mismatch: Option<Mismatch>,
}

impl ComparisonResult {
    pub fn equal() -> Self {
        Self { mismatch: None }
    }

    pub fn differ(mismatch: Mismatch) -> Self {
        Self {
            mismatch: Some(mismatch),
        }
    }

    pub fn is_equal(&self) -> bool {
        self.mismatch.is_none()
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        self.mismatch.as_ref()
    }

    /// `"OK"` when equal, otherwise the mismatch description.
    pub fn reason(&self) -> String {
        match &self.mismatch {
            None => "OK".to_string(),
            Some(m) => m.to_string(),
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Compares `actual` against `expected` using `tolerance` as both the relative
/// and the absolute bound for numeric tokens.
pub fn compare(expected: &str, actual: &str, tolerance: f64) -> ComparisonResult {
    match first_mismatch(expected, actual, tolerance) {
        Some(mismatch) => ComparisonResult::differ(mismatch),
        None => ComparisonResult::equal(),
    }
}

/// Parses a token as a decimal number, or returns `None` if it is text.
///
/// `inf`, `nan`, hexadecimal and digit-separated forms are text. Literals that
/// overflow `f64` become infinities.
pub fn parse_number(token: &str) -> Option<f64> {
    if !NUMBER.is_match(token) {
        return None;
    }
    token.parse::<f64>().ok()
}

/// `|a - b| <= tol * max(|a|, |b|)` or `|a - b| <= tol`.
pub fn is_close(a: f64, b: f64, tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    let diff = (a - b).abs();
    diff <= tolerance * a.abs().max(b.abs()) || diff <= tolerance
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn first_mismatch(expected: &str, actual: &str, tolerance: f64) -> Option<Mismatch> {
    let expected_lines = significant_lines(expected);
    let actual_lines = significant_lines(actual);

    if expected_lines.len() != actual_lines.len() {
        return Some(Mismatch::LineCount {
            expected: expected_lines.len(),
            actual: actual_lines.len(),
        });
    }

    for (i, (exp_line, act_line)) in expected_lines.iter().zip(&actual_lines).enumerate() {
        let line = i + 1;
        let exp_tokens: Vec<&str> = exp_line.split_whitespace().collect();
        let act_tokens: Vec<&str> = act_line.split_whitespace().collect();

        if exp_tokens.len() != act_tokens.len() {
            return Some(Mismatch::TokenCount {
                line,
                expected: exp_tokens.len(),
                actual: act_tokens.len(),
            });
        }

        for (j, (exp, act)) in exp_tokens.iter().zip(&act_tokens).enumerate() {
            if let Some(mismatch) = compare_tokens(line, j + 1, exp, act, tolerance) {
                return Some(mismatch);
            }
        }
    }

    None
}

fn compare_tokens(
    line: usize,
    token: usize,
    expected: &str,
    actual: &str,
    tolerance: f64,
) -> Option<Mismatch> {
    match (Token::classify(expected), Token::classify(actual)) {
        (Token::Number(e), Token::Number(a)) => {
            if is_close(e, a, tolerance) {
                return None;
            }
            Some(Mismatch::Numeric {
                line,
                token,
                expected: expected.to_string(),
                actual: actual.to_string(),
                tolerance,
            })
        }
        _ if expected == actual => None,
        _ => Some(Mismatch::Text {
            line,
            token,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }),
    }
}

/// Lines of `text` with the trailing run of blank lines removed.
fn significant_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}
