//! The build step: turn a source file into a runnable artifact.
//!
//! Compilation itself is delegated to an external compiler; this module only
//! assembles the command line, reports the outcome and owns the resulting file.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::JudgeError;

/// Produces a [`BuildArtifact`] from a source file.
pub trait Builder {
    fn build(&self, source: &Path, artifact: &Path) -> Result<BuildArtifact, JudgeError>;
}

/// Compiler program and the fixed flags passed before `-o <artifact> <source>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    pub program: String,
    pub flags: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "g++".to_string(),
            flags: vec!["-std=c++17".to_string(), "-O2".to_string()],
        }
    }
}

impl CompilerConfig {
    pub fn command(&self, source: &Path, artifact: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.flags).arg("-o").arg(artifact).arg(source);
        cmd
    }
}

/// Runs an external compiler. Its own diagnostics go straight to the terminal.
#[derive(Debug, Clone, Default)]
pub struct CompilerBuilder {
    pub config: CompilerConfig,
}

impl CompilerBuilder {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }
}

impl Builder for CompilerBuilder {
    fn build(&self, source: &Path, artifact: &Path) -> Result<BuildArtifact, JudgeError> {
        let mut cmd = self.config.command(source, artifact);
        log::info!("running {:?}", cmd);

        let status = cmd.status().map_err(|e| JudgeError::CompilerLaunch {
            program: self.config.program.clone(),
            source: e,
        })?;
        if !status.success() {
            return Err(JudgeError::BuildFailed {
                source_path: source.to_path_buf(),
                status,
            });
        }

        Ok(BuildArtifact::new(absolute(artifact)))
    }
}

/// The compiled executable. Deleted from disk on [`release`](Self::release),
/// or on drop if it was never released.
#[derive(Debug)]
pub struct BuildArtifact {
    path: PathBuf,
    released: bool,
}

impl BuildArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the artifact file.
    pub fn release(mut self) -> io::Result<()> {
        self.released = true;
        log::debug!("removing artifact {}", self.path.display());
        fs::remove_file(&self.path)
    }
}

impl Drop for BuildArtifact {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!("could not remove artifact {}: {}", self.path.display(), e);
        }
    }
}

/// Applies the platform executable suffix (`.exe` on Windows) to `name`.
pub fn artifact_path(name: &str) -> PathBuf {
    artifact_path_with_suffix(name, env::consts::EXE_SUFFIX)
}

fn artifact_path_with_suffix(name: &str, suffix: &str) -> PathBuf {
    if suffix.is_empty() || name.ends_with(suffix) {
        return PathBuf::from(name);
    }
    PathBuf::from(format!("{}{}", name, suffix))
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
