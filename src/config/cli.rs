//! CLI argument types - Cli, Command, and per-command argument structs
//!
//! # Usage
//!
//! ```bash
//! exportar sweep
//! exportar sweep plan.yaml --dry-run
//! exportar single yolo11n --imgsz 320
//! exportar completion bash
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::bridge::YoloCli;
use crate::catalog::ModelName;
use crate::export::{ExportFormat, ImageSize};

/// Exportar: CoreML export sweeps for YOLO11 checkpoints
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "exportar")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Batch CoreML export sweeps for YOLO11 checkpoint families")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run an export sweep across task variants and sizes
    Sweep(SweepArgs),

    /// Export a single checkpoint
    Single(SingleArgs),

    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Arguments for the sweep command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SweepArgs {
    /// YAML sweep manifest; without one the full yolo11 sweep runs
    #[arg(value_name = "SPEC")]
    pub spec: Option<PathBuf>,

    /// Directory holding the checkpoints (overrides the manifest)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Print the plan without exporting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report after a fully successful sweep
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Converter executable to invoke
    #[arg(long, value_name = "BIN", default_value = YoloCli::DEFAULT_PROGRAM)]
    pub converter_bin: String,
}

/// Arguments for the single command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SingleArgs {
    /// Model identifier, e.g. yolo11n or yolo11x-seg
    #[arg(value_name = "MODEL", default_value = "yolo11n")]
    pub model: ModelName,

    /// Input resolution (SIDE or HEIGHT,WIDTH)
    #[arg(long, default_value = "320")]
    pub imgsz: ImageSize,

    /// Export without fused NMS
    #[arg(long)]
    pub no_nms: bool,

    /// INT8 post-training quantization
    #[arg(long)]
    pub int8: bool,

    /// FP16 weights
    #[arg(long)]
    pub half: bool,

    /// Target format
    #[arg(short, long, default_value = "coreml")]
    pub format: ExportFormat,

    /// Directory holding the checkpoint
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Converter executable to invoke
    #[arg(long, value_name = "BIN", default_value = YoloCli::DEFAULT_PROGRAM)]
    pub converter_bin: String,
}

/// Arguments for the completion command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: ShellType,
}

/// Shell type for completions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ShellType {
    #[default]
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl std::str::FromStr for ShellType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(ShellType::Bash),
            "zsh" => Ok(ShellType::Zsh),
            "fish" => Ok(ShellType::Fish),
            "powershell" | "ps" => Ok(ShellType::PowerShell),
            _ => Err(format!(
                "Unknown shell: {s}. Valid shells: bash, zsh, fish, powershell"
            )),
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::PowerShell => "powershell",
        };
        write!(f, "{name}")
    }
}

impl From<ShellType> for clap_complete::Shell {
    fn from(shell: ShellType) -> Self {
        match shell {
            ShellType::Bash => Self::Bash,
            ShellType::Zsh => Self::Zsh,
            ShellType::Fish => Self::Fish,
            ShellType::PowerShell => Self::PowerShell,
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
