//! Export request model
//!
//! Describes one conversion job: target format, input resolution, and
//! quantization switches. Requests are rendered into `key=value` argument
//! lists for the converter CLI.
//!
//! # Example
//!
//! ```ignore
//! use exportar::export::{ExportFormat, ExportRequest, ImageSize};
//!
//! let request = ExportRequest::new(ExportFormat::CoreMl, ImageSize::square(320)).nms(true);
//! let args = request.to_args(Path::new("yolo11n.pt"));
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ModelTask;

/// Target format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Apple CoreML package (directory artifact)
    CoreMl,
    /// ONNX graph (single file)
    Onnx,
    /// OpenVINO IR (directory artifact)
    OpenVino,
}

impl ExportFormat {
    /// Converter-side format tag (`format=coreml`)
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::CoreMl => "coreml",
            Self::Onnx => "onnx",
            Self::OpenVino => "openvino",
        }
    }

    /// Artifact name the converter writes for a given model id
    #[must_use]
    pub fn artifact_name(&self, model_id: &str) -> String {
        match self {
            Self::CoreMl => format!("{model_id}.mlpackage"),
            Self::Onnx => format!("{model_id}.onnx"),
            Self::OpenVino => format!("{model_id}_openvino_model"),
        }
    }

    /// Whether the artifact is a directory rather than a single file.
    /// Directory artifacts get zipped after export.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::CoreMl | Self::OpenVino)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coreml" | "mlpackage" => Ok(Self::CoreMl),
            "onnx" => Ok(Self::Onnx),
            "openvino" => Ok(Self::OpenVino),
            other => Err(format!(
                "Unknown export format '{other}' (expected one of: coreml, onnx, openvino)"
            )),
        }
    }
}

/// Input resolution as height x width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub height: u32,
    pub width: u32,
}

impl ImageSize {
    #[must_use]
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self {
            height: side,
            width: side,
        }
    }

    /// Default sweep resolution for a task head. Classifiers run at
    /// 224x224; every other head at 640x384.
    #[must_use]
    pub const fn for_task(task: ModelTask) -> Self {
        match task {
            ModelTask::Classify => Self::square(224),
            _ => Self::new(640, 384),
        }
    }

    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.height == self.width
    }

    /// Converter argument form: a single number for square inputs,
    /// `height,width` otherwise.
    #[must_use]
    pub fn to_arg(&self) -> String {
        if self.is_square() {
            self.height.to_string()
        } else {
            format!("{},{}", self.height, self.width)
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = if s.contains(',') {
            s.split(',').collect()
        } else if s.contains('x') {
            s.split('x').collect()
        } else {
            vec![s]
        };

        let parse_dim = |raw: &str| -> Result<u32, String> {
            let dim: u32 = raw
                .trim()
                .parse()
                .map_err(|_| format!("Invalid image size '{s}': '{raw}' is not a number"))?;
            if dim == 0 {
                return Err(format!("Invalid image size '{s}': dimensions must be positive"));
            }
            Ok(dim)
        };

        match parts.as_slice() {
            [side] => Ok(Self::square(parse_dim(side)?)),
            [height, width] => Ok(Self::new(parse_dim(height)?, parse_dim(width)?)),
            _ => Err(format!(
                "Invalid image size '{s}' (expected SIDE or HEIGHT,WIDTH)"
            )),
        }
    }
}

/// One conversion job for the converter CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Target format
    pub format: ExportFormat,
    /// Input resolution baked into the exported graph
    pub imgsz: ImageSize,
    /// INT8 post-training quantization
    pub int8: bool,
    /// Fuse non-max suppression into the graph
    pub nms: bool,
    /// FP16 weights
    pub half: bool,
}

impl ExportRequest {
    /// Create a request with all quantization switches off
    #[must_use]
    pub const fn new(format: ExportFormat, imgsz: ImageSize) -> Self {
        Self {
            format,
            imgsz,
            int8: false,
            nms: false,
            half: false,
        }
    }

    /// Set INT8 quantization
    #[must_use]
    pub const fn int8(mut self, on: bool) -> Self {
        self.int8 = on;
        self
    }

    /// Set NMS fusion
    #[must_use]
    pub const fn nms(mut self, on: bool) -> Self {
        self.nms = on;
        self
    }

    /// Set FP16 weights
    #[must_use]
    pub const fn half(mut self, on: bool) -> Self {
        self.half = on;
        self
    }

    /// Render the converter CLI argument list for a checkpoint
    #[must_use]
    pub fn to_args(&self, checkpoint: &Path) -> Vec<String> {
        let mut args = vec![
            "export".to_string(),
            format!("model={}", checkpoint.display()),
            format!("format={}", self.format.tag()),
            format!("imgsz={}", self.imgsz.to_arg()),
            format!("int8={}", py_bool(self.int8)),
            format!("nms={}", py_bool(self.nms)),
        ];
        if self.half {
            args.push("half=True".to_string());
        }
        args
    }
}

/// Boolean in the converter's Python-flavored syntax
const fn py_bool(v: bool) -> &'static str {
    if v {
        "True"
    } else {
        "False"
    }
}
