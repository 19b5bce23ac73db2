//! Converter bridge
//!
//! Conversion itself runs in the external `yolo` CLI, which owns the
//! PyTorch and coremltools stack. This module wraps that tool behind the
//! [`Converter`] trait so sweeps can be driven (and tested) without the
//! Python side installed.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::error::{Error, Result};
use crate::export::ExportRequest;

/// Lines of converter stderr kept in failure reports.
const STDERR_TAIL_LINES: usize = 20;

/// Checkpoint accepted by the converter side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    id: String,
    checkpoint: PathBuf,
}

impl ModelHandle {
    pub fn new(id: impl Into<String>, checkpoint: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            checkpoint: checkpoint.into(),
        }
    }

    /// Model id, e.g. `yolo11n`
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path of the checkpoint this handle was loaded from
    #[must_use]
    pub fn checkpoint(&self) -> &Path {
        &self.checkpoint
    }

    /// Directory the converter writes artifacts into (the checkpoint's own)
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        self.checkpoint.parent().unwrap_or(Path::new(""))
    }
}

/// Loads checkpoints and runs export jobs.
pub trait Converter {
    /// Validate a checkpoint and return a handle to it.
    fn load(&self, checkpoint: &Path) -> Result<ModelHandle>;

    /// Export a loaded model, returning the artifact path.
    fn export(&self, handle: &ModelHandle, request: &ExportRequest) -> Result<PathBuf>;
}

/// [`Converter`] backed by the `yolo` command-line tool.
#[derive(Debug, Clone)]
pub struct YoloCli {
    program: String,
}

impl YoloCli {
    /// Executable looked up on `PATH` by default.
    pub const DEFAULT_PROGRAM: &'static str = "yolo";

    #[must_use]
    pub fn new() -> Self {
        Self {
            program: Self::DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Use a different converter executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for YoloCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for YoloCli {
    fn load(&self, checkpoint: &Path) -> Result<ModelHandle> {
        if !checkpoint.is_file() {
            return Err(Error::CheckpointNotFound {
                path: checkpoint.to_path_buf(),
            });
        }
        let id = checkpoint
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| Error::CheckpointNotFound {
                path: checkpoint.to_path_buf(),
            })?;
        Ok(ModelHandle::new(id, checkpoint))
    }

    fn export(&self, handle: &ModelHandle, request: &ExportRequest) -> Result<PathBuf> {
        let args = request.to_args(handle.checkpoint());
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| Error::ConverterLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ConverterFailed {
                model: handle.id().to_string(),
                detail: failure_detail(output.status, stderr.trim()),
            });
        }

        let artifact = handle
            .output_dir()
            .join(request.format.artifact_name(handle.id()));
        if !artifact.exists() {
            return Err(Error::PackageMissing { path: artifact });
        }
        Ok(artifact)
    }
}

/// Exit status plus the tail of stderr. Converter tracebacks run long;
/// the last lines carry the actual exception.
fn failure_detail(status: ExitStatus, stderr: &str) -> String {
    if stderr.is_empty() {
        return status.to_string();
    }
    let lines: Vec<&str> = stderr.lines().collect();
    let tail = if lines.len() > STDERR_TAIL_LINES {
        lines[lines.len() - STDERR_TAIL_LINES..].join("\n")
    } else {
        stderr.to_string()
    };
    format!("{status}: {tail}")
}
