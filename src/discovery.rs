use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::JudgeError;

/// One input/expected-output pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Base file name without extension, e.g. `t1`.
    pub name: String,
    pub input: PathBuf,
    pub expected: PathBuf,
}

impl TestCase {
    /// Pairs an input file with the expected-output file of the same base name.
    ///
    /// The expected file is not checked for existence here; a missing one
    /// fails the case when it runs.
    pub fn from_input(input: PathBuf, expected_extension: &str) -> Self {
        let name = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let expected = input.with_extension(expected_extension);
        Self {
            name,
            input,
            expected,
        }
    }

    /// The input file name as shown in the report, e.g. `t1.in`.
    pub fn display_name(&self) -> String {
        self.input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}

/// Finds every `*.{input_extension}` file directly inside `dir`.
///
/// Cases are sorted by file name so that reruns visit them in the same order.
/// An empty result is an error.
pub fn discover_cases<P: AsRef<Path>>(
    dir: P,
    input_extension: &str,
    expected_extension: &str,
) -> Result<Vec<TestCase>, JudgeError> {
    let dir = dir.as_ref();
    let mut inputs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| JudgeError::Discovery {
            dir: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_extension(entry.path(), input_extension) {
            continue;
        }
        inputs.push(entry.into_path());
    }

    if inputs.is_empty() {
        return Err(JudgeError::NoTestCases {
            dir: dir.to_path_buf(),
            extension: input_extension.to_string(),
        });
    }

    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("discovered {} case(s) in {}", inputs.len(), dir.display());

    Ok(inputs
        .into_iter()
        .map(|input| TestCase::from_input(input, expected_extension))
        .collect())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
