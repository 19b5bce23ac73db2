//! Sweep manifest
//!
//! A sweep is declared as a YAML manifest deserialized into [`SweepSpec`].
//! Every field has a default, and the all-defaults manifest reproduces the
//! canonical 25-model CoreML sweep (five task variants by five sizes,
//! INT8, family `yolo11`).
//!
//! ```yaml
//! family: yolo11
//! tasks: [detect, segment]
//! sizes: [n, x]
//! int8: true
//! dir: weights
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{ModelName, ModelSize, ModelTask};
use crate::error::{Error, Result};
use crate::export::ExportFormat;

/// Declarative sweep description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    /// Checkpoint family prefix
    #[serde(default = "default_family")]
    pub family: String,

    /// Task variants, outer sweep loop
    #[serde(default = "default_tasks")]
    pub tasks: Vec<ModelTask>,

    /// Parameter scales, inner sweep loop
    #[serde(default = "default_sizes")]
    pub sizes: Vec<ModelSize>,

    /// Target format
    #[serde(default = "default_format")]
    pub format: ExportFormat,

    /// INT8 post-training quantization
    #[serde(default = "default_int8")]
    pub int8: bool,

    /// Directory holding checkpoints; the `--dir` flag wins over this
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_family() -> String {
    ModelName::DEFAULT_FAMILY.to_string()
}

fn default_tasks() -> Vec<ModelTask> {
    ModelTask::ALL.to_vec()
}

fn default_sizes() -> Vec<ModelSize> {
    ModelSize::ALL.to_vec()
}

fn default_format() -> ExportFormat {
    ExportFormat::CoreMl
}

fn default_int8() -> bool {
    true
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            family: default_family(),
            tasks: default_tasks(),
            sizes: default_sizes(),
            format: default_format(),
            int8: default_int8(),
            dir: None,
        }
    }
}

impl SweepSpec {
    /// Read and validate a manifest file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Manifest(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&text)
    }

    /// Parse and validate manifest text. Empty text means all defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let spec: Self = serde_yaml::from_str(text).map_err(|e| Error::Manifest(e.to_string()))?;
        spec.validate().map_err(Error::Manifest)?;
        Ok(spec)
    }

    /// Reject empty family, empty lists, and repeated entries.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.family.trim().is_empty() {
            return Err("family must not be empty".to_string());
        }
        if self.tasks.is_empty() {
            return Err("tasks must not be empty".to_string());
        }
        if self.sizes.is_empty() {
            return Err("sizes must not be empty".to_string());
        }
        if has_repeats(&self.tasks) {
            return Err("tasks must not repeat".to_string());
        }
        if has_repeats(&self.sizes) {
            return Err("sizes must not repeat".to_string());
        }
        Ok(())
    }
}

fn has_repeats<T: PartialEq>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, item)| items[..i].contains(item))
}
