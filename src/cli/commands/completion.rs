//! Completion command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{Cli, CompletionArgs};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Render the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "exportar", out);
}

pub fn run_completion(args: CompletionArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Verbose,
        &format!("Generating completions for: {}", args.shell),
    );

    write_completions(args.shell.into(), &mut std::io::stdout());
    Ok(())
}
