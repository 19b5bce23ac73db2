//! Error types for the export pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while loading, converting, or archiving models.
#[derive(Debug, Error)]
pub enum Error {
    /// Checkpoint path does not exist or is not a regular file.
    #[error("Checkpoint not found: {}", .path.display())]
    CheckpointNotFound { path: PathBuf },

    /// The converter executable could not be started at all.
    #[error("Failed to launch converter '{program}': {source}")]
    ConverterLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran and reported failure.
    #[error("Converter failed for {model}: {detail}")]
    ConverterFailed { model: String, detail: String },

    /// The converter reported success but the expected package is absent.
    #[error("Export produced no package at {}", .path.display())]
    PackageMissing { path: PathBuf },

    /// Sweep manifest could not be read or failed validation.
    #[error("Invalid sweep manifest: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
