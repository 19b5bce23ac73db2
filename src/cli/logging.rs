//! Console output utilities for CLI commands

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

/// Whether a message gated at `required` prints under `level`
fn should_log(level: LogLevel, required: LogLevel) -> bool {
    level != LogLevel::Quiet && (level == required || required == LogLevel::Normal)
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if should_log(level, required) {
        println!("{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_suppresses_everything() {
        assert!(!should_log(LogLevel::Quiet, LogLevel::Normal));
        assert!(!should_log(LogLevel::Quiet, LogLevel::Verbose));
    }

    #[test]
    fn test_normal_level_hides_verbose_detail() {
        assert!(should_log(LogLevel::Normal, LogLevel::Normal));
        assert!(!should_log(LogLevel::Normal, LogLevel::Verbose));
    }

    #[test]
    fn test_verbose_level_shows_all() {
        assert!(should_log(LogLevel::Verbose, LogLevel::Normal));
        assert!(should_log(LogLevel::Verbose, LogLevel::Verbose));
    }
}
