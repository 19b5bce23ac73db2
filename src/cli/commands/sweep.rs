//! Sweep command implementation

use std::path::PathBuf;

use crate::bridge::YoloCli;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{SweepArgs, SweepSpec};
use crate::sweep::{self, SweepReport};

/// Load the manifest, or fall back to the canonical full sweep.
fn load_spec(args: &SweepArgs) -> Result<SweepSpec, String> {
    match &args.spec {
        Some(path) => SweepSpec::from_yaml_file(path).map_err(|e| e.to_string()),
        None => Ok(SweepSpec::default()),
    }
}

/// Working directory: the flag wins over the manifest, default `.`
fn resolve_dir(args: &SweepArgs, spec: &SweepSpec) -> PathBuf {
    args.dir
        .clone()
        .or_else(|| spec.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn run_sweep(args: SweepArgs, level: LogLevel) -> Result<(), String> {
    // 1. Resolve spec and working directory
    let spec = load_spec(&args)?;
    let dir = resolve_dir(&args, &spec);
    let jobs = sweep::plan(&spec);

    log(
        level,
        LogLevel::Verbose,
        &format!("Planned {} exports in {}", jobs.len(), dir.display()),
    );

    // 2. Dry run prints the plan and touches nothing
    if args.dry_run {
        for job in &jobs {
            println!("{}", job.describe());
        }
        return Ok(());
    }

    // 3. Run the sweep, fail-fast
    let converter = YoloCli::with_program(args.converter_bin.as_str());
    let records = sweep::run(&converter, &dir, &jobs).map_err(|e| e.to_string())?;
    let count = records.len();

    // 4. A report only exists after a fully successful run
    if let Some(report_path) = &args.report {
        SweepReport::new(records)
            .write_json(report_path)
            .map_err(|e| e.to_string())?;
        log(
            level,
            LogLevel::Normal,
            &format!("Report written to {}", report_path.display()),
        );
    }

    log(level, LogLevel::Normal, &format!("✓ Exported {count} models"));
    Ok(())
}
