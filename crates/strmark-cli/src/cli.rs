//! CLI argument definitions for strmark.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_LOG_FILTER, LogFormat, Strategy};

/// Command-line interface for the strmark string-marking tool.
#[derive(Parser, Debug)]
#[command(
    name = "strmark",
    version,
    about = "Wrap unmarked string literals in translation-marker calls"
)]
pub(crate) struct Cli {
    /// How string literals are located.
    #[arg(long, value_enum, default_value_t = Strategy::Line)]
    pub(crate) strategy: Strategy,
    /// Reports changed lines without rewriting the file.
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// Tracing filter for diagnostics written to stderr.
    #[arg(long, value_name = "FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub(crate) log_filter: String,
    /// Diagnostic output format (`json` or `compact`).
    #[arg(long, value_name = "FORMAT", default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
    /// The source file to rewrite in place.
    #[arg(value_name = "PATH")]
    pub(crate) path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_with_defaults() {
        let cli = Cli::try_parse_from(["strmark", "app.rb"]).expect("parse");
        assert_eq!(cli.path, PathBuf::from("app.rb"));
        assert_eq!(cli.strategy, Strategy::Line);
        assert!(!cli.dry_run);
        assert_eq!(cli.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn parses_every_option() {
        let cli = Cli::try_parse_from([
            "strmark",
            "--strategy",
            "ast",
            "--dry-run",
            "--log-filter",
            "debug",
            "--log-format",
            "json",
            "lib/app.rb",
        ])
        .expect("parse");
        assert_eq!(cli.strategy, Strategy::Ast);
        assert!(cli.dry_run);
        assert_eq!(cli.log_filter, "debug");
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_missing_path() {
        assert!(Cli::try_parse_from(["strmark"]).is_err());
    }

    #[test]
    fn rejects_extra_paths() {
        assert!(Cli::try_parse_from(["strmark", "a.rb", "b.rb"]).is_err());
    }
}
