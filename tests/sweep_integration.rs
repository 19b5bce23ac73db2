//! Export Sweep Integration Tests
//!
//! Drives the sweep pipeline through the public API with a stub converter:
//! the canonical 25-model plan, archive naming, fail-fast behavior, and
//! the CLI dispatcher end to end.

use exportar::bridge::{Converter, ModelHandle};
use exportar::config::SweepSpec;
use exportar::error::{Error, Result};
use exportar::export::{ExportRequest, ImageSize};
use exportar::sweep;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every id of the default sweep, in the order it must run.
const CANONICAL_ORDER: [&str; 25] = [
    "yolo11n",
    "yolo11s",
    "yolo11m",
    "yolo11l",
    "yolo11x",
    "yolo11n-seg",
    "yolo11s-seg",
    "yolo11m-seg",
    "yolo11l-seg",
    "yolo11x-seg",
    "yolo11n-cls",
    "yolo11s-cls",
    "yolo11m-cls",
    "yolo11l-cls",
    "yolo11x-cls",
    "yolo11n-pose",
    "yolo11s-pose",
    "yolo11m-pose",
    "yolo11l-pose",
    "yolo11x-pose",
    "yolo11n-obb",
    "yolo11s-obb",
    "yolo11m-obb",
    "yolo11l-obb",
    "yolo11x-obb",
];

/// Converter that fabricates package directories and records each request.
struct StubConverter {
    requests: RefCell<Vec<(String, ExportRequest)>>,
    fail_on: Option<String>,
}

impl StubConverter {
    fn new() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            fail_on: None,
        }
    }

    fn failing_on(id: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            fail_on: Some(id.to_string()),
        }
    }

    fn requests(&self) -> Vec<(String, ExportRequest)> {
        self.requests.borrow().clone()
    }
}

impl Converter for StubConverter {
    fn load(&self, checkpoint: &Path) -> Result<ModelHandle> {
        if !checkpoint.is_file() {
            return Err(Error::CheckpointNotFound {
                path: checkpoint.to_path_buf(),
            });
        }
        let id = checkpoint
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(ModelHandle::new(id, checkpoint))
    }

    fn export(&self, handle: &ModelHandle, request: &ExportRequest) -> Result<PathBuf> {
        self.requests
            .borrow_mut()
            .push((handle.id().to_string(), *request));
        if self.fail_on.as_deref() == Some(handle.id()) {
            return Err(Error::ConverterFailed {
                model: handle.id().to_string(),
                detail: "stub conversion failure".to_string(),
            });
        }
        let package = handle
            .output_dir()
            .join(request.format.artifact_name(handle.id()));
        fs::create_dir_all(package.join("Data")).unwrap();
        fs::write(package.join("Data/model.mlmodel"), b"stub weights").unwrap();
        fs::write(package.join("Manifest.json"), b"{}").unwrap();
        Ok(package)
    }
}

fn seed_all_checkpoints(dir: &Path) {
    for id in CANONICAL_ORDER {
        fs::write(dir.join(format!("{id}.pt")), b"fake weights").unwrap();
    }
}

// ============================================================================
// SECTION A: PLAN
// ============================================================================

mod section_a_plan {
    use super::*;

    #[test]
    fn default_plan_matches_canonical_order() {
        let jobs = sweep::plan(&SweepSpec::default());
        let ids: Vec<String> = jobs.iter().map(|job| job.id()).collect();
        assert_eq!(ids, CANONICAL_ORDER);
    }

    #[test]
    fn classify_pairs_request_small_square_input() {
        for job in sweep::plan(&SweepSpec::default()) {
            if job.id().ends_with("-cls") {
                assert_eq!(job.request.imgsz, ImageSize::square(224));
            } else {
                assert_eq!(job.request.imgsz, ImageSize::new(640, 384));
            }
        }
    }

    #[test]
    fn only_plain_detect_pairs_request_nms() {
        for job in sweep::plan(&SweepSpec::default()) {
            let plain = !job.id().contains('-');
            assert_eq!(job.request.nms, plain, "wrong nms for {}", job.id());
        }
    }
}

// ============================================================================
// SECTION B: FULL SWEEP RUN
// ============================================================================

mod section_b_run {
    use super::*;

    #[test]
    fn full_sweep_produces_25_renamed_archives() {
        let tmp = TempDir::new().unwrap();
        seed_all_checkpoints(tmp.path());

        let converter = StubConverter::new();
        let jobs = sweep::plan(&SweepSpec::default());
        let records = sweep::run(&converter, tmp.path(), &jobs).unwrap();

        assert_eq!(records.len(), 25);
        for id in CANONICAL_ORDER {
            let archive = tmp.path().join(format!("{id}.mlpackage.zip"));
            assert!(archive.is_file(), "missing archive for {id}");
            // The converter's package is left in place next to the archive
            assert!(tmp.path().join(format!("{id}.mlpackage")).is_dir());
            // No stray <stem>.zip from the intermediate step
            assert!(!tmp.path().join(format!("{id}.zip")).exists());
        }
    }

    #[test]
    fn converter_sees_requests_in_sweep_order() {
        let tmp = TempDir::new().unwrap();
        seed_all_checkpoints(tmp.path());

        let converter = StubConverter::new();
        let jobs = sweep::plan(&SweepSpec::default());
        sweep::run(&converter, tmp.path(), &jobs).unwrap();

        let seen: Vec<String> = converter.requests().into_iter().map(|(id, _)| id).collect();
        assert_eq!(seen, CANONICAL_ORDER);
    }

    #[test]
    fn every_sweep_request_is_int8_coreml() {
        let tmp = TempDir::new().unwrap();
        seed_all_checkpoints(tmp.path());

        let converter = StubConverter::new();
        let jobs = sweep::plan(&SweepSpec::default());
        sweep::run(&converter, tmp.path(), &jobs).unwrap();

        for (id, request) in converter.requests() {
            assert!(request.int8, "{id} should be int8");
            assert!(request.format.is_directory(), "{id} should target coreml");
            assert!(!request.half, "{id} should not be half precision");
        }
    }
}

// ============================================================================
// SECTION C: FAIL-FAST
// ============================================================================

mod section_c_fail_fast {
    use super::*;

    #[test]
    fn failure_mid_sweep_stops_all_later_pairs() {
        let tmp = TempDir::new().unwrap();
        seed_all_checkpoints(tmp.path());

        // yolo11m-cls is pair 13 of 25 (index 12)
        let converter = StubConverter::failing_on("yolo11m-cls");
        let jobs = sweep::plan(&SweepSpec::default());
        let err = sweep::run(&converter, tmp.path(), &jobs).unwrap_err();
        assert!(matches!(err, Error::ConverterFailed { .. }));

        for (i, id) in CANONICAL_ORDER.iter().enumerate() {
            let archive = tmp.path().join(format!("{id}.mlpackage.zip"));
            if i < 12 {
                assert!(archive.is_file(), "pair {id} before the failure lost");
            } else {
                assert!(!archive.exists(), "pair {id} should not have run");
            }
        }

        // The failing pair was the last the converter ever saw
        let seen = converter.requests();
        assert_eq!(seen.len(), 13);
        assert_eq!(seen.last().map(|(id, _)| id.as_str()), Some("yolo11m-cls"));
    }

    #[test]
    fn missing_checkpoint_aborts_without_touching_converter() {
        let tmp = TempDir::new().unwrap();
        // Only the first checkpoint exists
        fs::write(tmp.path().join("yolo11n.pt"), b"fake weights").unwrap();

        let converter = StubConverter::new();
        let jobs = sweep::plan(&SweepSpec::default());
        let err = sweep::run(&converter, tmp.path(), &jobs).unwrap_err();

        match err {
            Error::CheckpointNotFound { path } => {
                assert!(path.ends_with("yolo11s.pt"));
            }
            other => panic!("expected CheckpointNotFound, got {other:?}"),
        }
        assert_eq!(converter.requests().len(), 1);
        assert!(tmp.path().join("yolo11n.mlpackage.zip").is_file());
    }
}

// ============================================================================
// SECTION D: CLI DISPATCH
// ============================================================================

#[cfg(unix)]
mod section_d_cli {
    use super::*;
    use exportar::cli::run_command;
    use exportar::config::parse_args;

    fn fake_converter(dir: &Path, exit_code: u8) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-yolo");
        let script = format!(
            "#!/bin/sh\n\
             model=\"\"\n\
             for arg in \"$@\"; do\n\
             \x20 case \"$arg\" in\n\
             \x20   model=*) model=\"${{arg#model=}}\" ;;\n\
             \x20 esac\n\
             done\n\
             if [ {exit_code} -ne 0 ]; then\n\
             \x20 echo 'RuntimeError: conversion failed' >&2\n\
             \x20 exit {exit_code}\n\
             fi\n\
             pkg=\"${{model%.pt}}.mlpackage\"\n\
             mkdir -p \"$pkg\"\n\
             printf 'stub weights' > \"$pkg/model.mlmodel\"\n"
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn sweep_command_end_to_end_writes_report() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sweep.yaml"), "tasks: [detect]\nsizes: [n]\n").unwrap();
        fs::write(tmp.path().join("yolo11n.pt"), b"fake weights").unwrap();
        let converter = fake_converter(tmp.path(), 0);
        let report = tmp.path().join("report.json");

        let cli = parse_args([
            "exportar",
            "--quiet",
            "sweep",
            tmp.path().join("sweep.yaml").to_str().unwrap(),
            "--dir",
            tmp.path().to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
            "--converter-bin",
            converter.to_str().unwrap(),
        ])
        .unwrap();

        run_command(cli).unwrap();

        assert!(tmp.path().join("yolo11n.mlpackage.zip").is_file());
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(value["exports"][0]["model"], "yolo11n");
        assert!(value["completed"].as_str().unwrap().len() == 10);
    }

    #[test]
    fn failed_sweep_writes_no_report() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sweep.yaml"), "tasks: [detect]\nsizes: [n]\n").unwrap();
        fs::write(tmp.path().join("yolo11n.pt"), b"fake weights").unwrap();
        let converter = fake_converter(tmp.path(), 1);
        let report = tmp.path().join("report.json");

        let cli = parse_args([
            "exportar",
            "--quiet",
            "sweep",
            tmp.path().join("sweep.yaml").to_str().unwrap(),
            "--dir",
            tmp.path().to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
            "--converter-bin",
            converter.to_str().unwrap(),
        ])
        .unwrap();

        let err = run_command(cli).unwrap_err();
        assert!(err.contains("yolo11n"), "unexpected error: {err}");
        assert!(err.contains("RuntimeError"), "stderr tail lost: {err}");
        assert!(!report.exists());
    }

    #[test]
    fn single_command_exports_one_package() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("yolo11s.pt"), b"fake weights").unwrap();
        let converter = fake_converter(tmp.path(), 0);

        let cli = parse_args([
            "exportar",
            "--quiet",
            "single",
            "yolo11s",
            "--dir",
            tmp.path().to_str().unwrap(),
            "--converter-bin",
            converter.to_str().unwrap(),
        ])
        .unwrap();

        run_command(cli).unwrap();

        assert!(tmp.path().join("yolo11s.mlpackage").is_dir());
        assert!(!tmp.path().join("yolo11s.mlpackage.zip").exists());
    }
}
