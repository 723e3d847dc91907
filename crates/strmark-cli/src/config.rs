//! Run configuration derived from the command line.
//!
//! The marking rules themselves are fixed; only the strategy, the dry-run
//! switch, and the logging sink are configurable.

use std::path::PathBuf;

use clap::ValueEnum;
use strum::{Display, EnumString};

use crate::cli::Cli;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// How string literals are located.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Regex scan, one line at a time.
    #[default]
    Line,
    /// Tree-sitter walk over the whole Ruby file.
    Ast,
}

/// Supported logging output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
    /// Human-readable single line output.
    #[default]
    Compact,
}

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// File to rewrite.
    pub path: PathBuf,
    /// Literal detection strategy.
    pub strategy: Strategy,
    /// Report changes but leave the file untouched.
    pub dry_run: bool,
    /// Tracing filter expression.
    pub log_filter: String,
    /// Tracing output format.
    pub log_format: LogFormat,
}

impl RunConfig {
    /// Creates a configuration for `path` with default settings.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strategy: Strategy::default(),
            dry_run: false,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::default(),
        }
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            path: cli.path,
            strategy: cli.strategy,
            dry_run: cli.dry_run,
            log_filter: cli.log_filter,
            log_format: cli.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("COMPACT", LogFormat::Compact)]
    fn log_format_parses_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(input.parse::<LogFormat>(), Ok(expected));
    }

    #[test]
    fn log_format_rejects_unknown_names() {
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn strategy_displays_in_snake_case() {
        assert_eq!(Strategy::Line.to_string(), "line");
        assert_eq!(Strategy::Ast.to_string(), "ast");
    }

    #[test]
    fn new_uses_defaults() {
        let config = RunConfig::new("app.rb");
        assert_eq!(config.strategy, Strategy::Line);
        assert!(!config.dry_run);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format, LogFormat::Compact);
    }
}
