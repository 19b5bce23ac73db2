//! Single export command implementation

use crate::bridge::{Converter, YoloCli};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::SingleArgs;
use crate::export::ExportRequest;

pub fn run_single(args: SingleArgs, level: LogLevel) -> Result<(), String> {
    let request = ExportRequest::new(args.format, args.imgsz)
        .int8(args.int8)
        .nms(!args.no_nms)
        .half(args.half);

    let checkpoint = args.dir.join(args.model.checkpoint_file());
    log(
        level,
        LogLevel::Verbose,
        &format!("Checkpoint: {}", checkpoint.display()),
    );

    log(
        level,
        LogLevel::Normal,
        &format!("Exporting {}...", args.model),
    );

    let converter = YoloCli::with_program(args.converter_bin.as_str());
    let handle = converter.load(&checkpoint).map_err(|e| e.to_string())?;
    let artifact = converter
        .export(&handle, &request)
        .map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!("✓ Exported to {}", artifact.display()),
    );
    Ok(())
}
