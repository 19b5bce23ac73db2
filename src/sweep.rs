//! Export sweep driver
//!
//! Expands a [`SweepSpec`] into its ordered cross-product of task variants
//! and sizes, then drives each pair through the same sequential pipeline:
//! load checkpoint, export, archive the package, rename the archive.
//!
//! The sweep is fail-fast by design: the first error aborts the run,
//! leaving earlier pairs fully processed and later pairs untouched. There
//! is no retry, resume, or partial-result reporting.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use crate::archive;
use crate::bridge::Converter;
use crate::catalog::ModelName;
use crate::config::SweepSpec;
use crate::error::Result;
use crate::export::{ExportRequest, ImageSize};

/// One planned export: which model, with which converter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub name: ModelName,
    pub request: ExportRequest,
}

impl ExportJob {
    /// Model identifier, e.g. `yolo11x-seg`
    #[must_use]
    pub fn id(&self) -> String {
        self.name.id()
    }

    /// One-line plan entry for `--dry-run` output
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{:<14} format={} imgsz={} int8={} nms={}",
            self.id(),
            self.request.format,
            self.request.imgsz.to_arg(),
            self.request.int8,
            self.request.nms
        )
    }
}

/// Expand a spec into its ordered plan: task variants outer, sizes inner.
///
/// Per-pair settings follow the task head: classifiers export at 224x224,
/// everything else at 640x384, and only detection gets fused NMS.
#[must_use]
pub fn plan(spec: &SweepSpec) -> Vec<ExportJob> {
    let mut jobs = Vec::with_capacity(spec.tasks.len() * spec.sizes.len());
    for &task in &spec.tasks {
        for &size in &spec.sizes {
            let request = ExportRequest::new(spec.format, ImageSize::for_task(task))
                .int8(spec.int8)
                .nms(task.uses_nms());
            jobs.push(ExportJob {
                name: ModelName::new(spec.family.clone(), size, task),
                request,
            });
        }
    }
    jobs
}

/// Outcome of one completed pair.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    /// Model identifier
    pub model: String,
    /// Final artifact: the renamed archive for directory packages, the
    /// exported file itself otherwise
    pub archive: PathBuf,
    /// Artifact size in bytes
    pub size_bytes: u64,
    /// Wall-clock time for load, export, and archive
    pub duration_ms: u64,
}

/// Run every job in order against checkpoints in `dir`, fail-fast.
///
/// Each pair prints one `Exporting <id>...` progress line, then loads
/// `<id>.pt`, exports it, and archives directory packages to
/// `<id>.<ext>.zip`. Returns one record per pair; any error aborts the
/// remainder of the sweep.
pub fn run<C: Converter>(converter: &C, dir: &Path, jobs: &[ExportJob]) -> Result<Vec<ExportRecord>> {
    let mut records = Vec::with_capacity(jobs.len());
    for job in jobs {
        println!("{}", progress_line(job));
        let started = Instant::now();

        let checkpoint = dir.join(job.name.checkpoint_file());
        let handle = converter.load(&checkpoint)?;
        let package = converter.export(&handle, &job.request)?;

        let archive = if job.request.format.is_directory() {
            archive::archive_package(&package)?
        } else {
            package
        };

        let size_bytes = fs::metadata(&archive)?.len();
        records.push(ExportRecord {
            model: job.id(),
            archive,
            size_bytes,
            duration_ms: started.elapsed().as_millis() as u64,
        });
    }
    Ok(records)
}

fn progress_line(job: &ExportJob) -> String {
    format!("Exporting {}...", job.id())
}

/// Summary of a fully successful sweep, written by `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Completion date (UTC, `YYYY-MM-DD`)
    pub completed: String,
    /// One record per exported pair, in sweep order
    pub exports: Vec<ExportRecord>,
}

impl SweepReport {
    #[must_use]
    pub fn new(exports: Vec<ExportRecord>) -> Self {
        Self {
            completed: Utc::now().format("%Y-%m-%d").to_string(),
            exports,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
