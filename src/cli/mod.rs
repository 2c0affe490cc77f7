//! The Verdict Command-Line Interface.
//!
//! This module is the main entry point for the binary: it parses arguments,
//! performs one-time terminal and logger setup, and hands off to the suite.

use std::process;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use termcolor::{ColorChoice, StandardStream};

use crate::build::CompilerConfig;
use crate::cli::args::{ColorMode, VerdictArgs};
use crate::cli::output::{fatal_line, Reporter};
use crate::errors::JudgeError;
use crate::suite::{Suite, SuiteConfig};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = VerdictArgs::parse();
    init_logger(args.verbose);

    let code = match execute(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", fatal_line(&e));
            e.exit_code()
        }
    };
    process::exit(code);
}

/// Runs the suite described by `args` and returns the exit status.
pub fn execute(args: &VerdictArgs) -> Result<i32, JudgeError> {
    let config = suite_config(args);
    log::debug!("configuration: {:?}", config);

    let stream = StandardStream::stdout(color_choice(args.color));
    let mut reporter = Reporter::new(stream).with_diff(config.show_diff);
    let suite = Suite::from_config(config);
    let report = suite.run(&args.folder, &mut reporter)?;

    if let Some(path) = &args.json {
        report.write_json(path)?;
        log::info!("report written to {}", path.display());
    }
    Ok(report.exit_code())
}

/// Maps parsed arguments onto a [`SuiteConfig`].
pub fn suite_config(args: &VerdictArgs) -> SuiteConfig {
    let mut compiler = CompilerConfig {
        program: args.compiler.clone(),
        ..CompilerConfig::default()
    };
    if !args.flags.is_empty() {
        compiler.flags = args.flags.clone();
    }

    SuiteConfig {
        tolerance: args.tol,
        artifact_name: args.out.clone(),
        source_name: args.source.clone(),
        compiler,
        timeout: args.timeout.map(Duration::from_millis),
        show_diff: args.diff,
        ..SuiteConfig::default()
    }
}

fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    }
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
