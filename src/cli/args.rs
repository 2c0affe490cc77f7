//! Defines the command-line arguments for the Verdict CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "verdict",
    version,
    about = "Compile a program once and check it against every <case>.in/<case>.out pair."
)]
pub struct VerdictArgs {
    /// Folder containing the source file and a `tests` subdirectory.
    #[arg(required = true)]
    pub folder: PathBuf,

    /// Relative and absolute tolerance for numeric tokens.
    #[arg(long, default_value_t = 1e-4, value_parser = parse_tolerance)]
    pub tol: f64,

    /// Name of the compiled executable.
    #[arg(long, default_value = "program")]
    pub out: String,

    /// Source file name inside the folder.
    #[arg(long, default_value = "main.cpp")]
    pub source: String,

    /// Compiler program.
    #[arg(long, default_value = "g++")]
    pub compiler: String,

    /// Compiler flag; repeat to pass several. Replaces `-std=c++17 -O2` when given.
    #[arg(long = "flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub flags: Vec<String>,

    /// Per-case time limit in milliseconds. Unlimited when omitted.
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Show a line diff of expected vs actual output under failing cases.
    #[arg(long)]
    pub diff: bool,

    /// Write the full report as JSON to this path.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// When to color the report.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

fn parse_tolerance(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("tolerance must be finite and non-negative, got {}", raw));
    }
    Ok(value)
}
