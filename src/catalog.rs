//! Model catalog: checkpoint families, parameter scales, and task heads.
//!
//! A checkpoint id is `<family><size><suffix>`, e.g. `yolo11n` or
//! `yolo11x-seg`. The task head carries the export-relevant capabilities
//! (id suffix, NMS fusion).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Parameter-scale code within a checkpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    /// Nano
    N,
    /// Small
    S,
    /// Medium
    M,
    /// Large
    L,
    /// Extra-large
    X,
}

impl ModelSize {
    /// All scales, smallest to largest. Sweeps iterate in this order.
    pub const ALL: [Self; 5] = [Self::N, Self::S, Self::M, Self::L, Self::X];

    /// Single-letter code used in checkpoint ids.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::M => "m",
            Self::L => "l",
            Self::X => "x",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ModelSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" => Ok(Self::N),
            "s" => Ok(Self::S),
            "m" => Ok(Self::M),
            "l" => Ok(Self::L),
            "x" => Ok(Self::X),
            other => Err(format!(
                "Unknown model size '{other}' (expected one of: n, s, m, l, x)"
            )),
        }
    }
}

/// Task head a checkpoint was trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTask {
    /// Object detection (base variant, no id suffix)
    Detect,
    /// Instance segmentation
    Segment,
    /// Image classification
    Classify,
    /// Pose / keypoint estimation
    Pose,
    /// Oriented bounding boxes
    Obb,
}

impl ModelTask {
    /// All task heads in sweep order. Detection comes first.
    pub const ALL: [Self; 5] = [
        Self::Detect,
        Self::Segment,
        Self::Classify,
        Self::Pose,
        Self::Obb,
    ];

    /// Id suffix appended to the family+size stem. Empty for detection.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Detect => "",
            Self::Segment => "-seg",
            Self::Classify => "-cls",
            Self::Pose => "-pose",
            Self::Obb => "-obb",
        }
    }

    /// Whether exports of this task embed non-max suppression.
    /// Only raw detection outputs go through NMS.
    #[must_use]
    pub const fn uses_nms(&self) -> bool {
        matches!(self, Self::Detect)
    }
}

impl fmt::Display for ModelTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Detect => "detect",
            Self::Segment => "segment",
            Self::Classify => "classify",
            Self::Pose => "pose",
            Self::Obb => "obb",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ModelTask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('-').to_lowercase();
        match normalized.as_str() {
            "" | "detect" => Ok(Self::Detect),
            "seg" | "segment" => Ok(Self::Segment),
            "cls" | "classify" => Ok(Self::Classify),
            "pose" => Ok(Self::Pose),
            "obb" => Ok(Self::Obb),
            other => Err(format!(
                "Unknown task '{other}' (expected one of: detect, segment, classify, pose, obb)"
            )),
        }
    }
}

/// Fully-qualified model identifier: family, scale, and task head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelName {
    family: String,
    size: ModelSize,
    task: ModelTask,
}

impl ModelName {
    /// Checkpoint family targeted when none is given.
    pub const DEFAULT_FAMILY: &'static str = "yolo11";

    pub fn new(family: impl Into<String>, size: ModelSize, task: ModelTask) -> Self {
        Self {
            family: family.into(),
            size,
            task,
        }
    }

    /// Canonical id, e.g. `yolo11n` or `yolo11x-seg`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}{}{}", self.family, self.size.code(), self.task.suffix())
    }

    /// PyTorch checkpoint file name for this model (`<id>.pt`).
    #[must_use]
    pub fn checkpoint_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.pt", self.id()))
    }

    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    #[must_use]
    pub const fn size(&self) -> ModelSize {
        self.size
    }

    #[must_use]
    pub const fn task(&self) -> ModelTask {
        self.task
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ModelName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (stem, task) = match s.rsplit_once('-') {
            Some((stem, suffix)) => {
                let task = suffix
                    .parse::<ModelTask>()
                    .map_err(|e| format!("Invalid model id '{s}': {e}"))?;
                (stem, task)
            }
            None => (s, ModelTask::Detect),
        };

        let code = stem
            .chars()
            .last()
            .ok_or_else(|| format!("Invalid model id '{s}': empty stem"))?;
        let family = &stem[..stem.len() - code.len_utf8()];
        if family.is_empty() {
            return Err(format!(
                "Invalid model id '{s}': missing family prefix before size code"
            ));
        }
        let size = code
            .to_string()
            .parse::<ModelSize>()
            .map_err(|e| format!("Invalid model id '{s}': {e}"))?;

        Ok(Self::new(family, size, task))
    }
}
