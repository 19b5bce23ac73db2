//! Exportar CLI
//!
//! Sweep-exports YOLO11 checkpoints to CoreML packages via the external
//! `yolo` converter.
//!
//! # Usage
//!
//! ```bash
//! # Full 25-model sweep in the current directory
//! exportar sweep
//!
//! # Preview the plan without exporting
//! exportar sweep --dry-run
//!
//! # Sweep from a manifest, writing a JSON report
//! exportar sweep plan.yaml --report report.json
//!
//! # One-off export of a single checkpoint
//! exportar single yolo11n --imgsz 320
//! ```

use clap::Parser;
use exportar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
