//! Build a program once and check it against a folder of input/expected-output
//! cases, comparing output token by token with numeric tolerance.

pub use crate::errors::{CaseError, JudgeError};

pub mod build;
pub mod cli;
pub mod compare;
pub mod discovery;
pub mod errors;
pub mod exec;
pub mod runner;
pub mod suite;
