//! Configuration: sweep manifests and CLI argument types

mod cli;
mod spec;

pub use cli::{
    parse_args, Cli, Command, CompletionArgs, ShellType, SingleArgs, SweepArgs,
};
pub use spec::SweepSpec;
