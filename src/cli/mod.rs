//! CLI module for exportar
//!
//! Command dispatch, console output gating, and the handlers for the
//! `sweep`, `single`, and `completion` commands.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

// Re-export Cli from config for convenience
pub use crate::config::Cli;
