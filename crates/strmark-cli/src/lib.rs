//! Command-line runtime for the strmark string-marking tool.
//!
//! The module owns argument parsing, telemetry bootstrapping, and the
//! [`MarkSession`] that rewrites a single file. The interface is designed to
//! be exercised both from the binary entrypoint and from tests where the
//! output streams can be substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod cli;
pub mod config;
mod errors;
pub mod report;
pub mod scratch;
pub mod session;
pub mod telemetry;

use cli::Cli;
pub use config::{LogFormat, RunConfig, Strategy};
use errors::AppError;
pub use errors::MarkError;
pub use session::{MarkSession, MarkSummary};

/// Runs the CLI using the provided arguments and IO handles.
///
/// Changed-line reports go to `stdout`; diagnostics for fatal errors go to
/// `stderr` as a single line.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return render_usage(&error, stdout, stderr),
    };

    match execute(&RunConfig::from(cli), stdout) {
        Ok(summary) => {
            debug!(?summary, "run complete");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "strmark: {error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<W: Write>(config: &RunConfig, stdout: &mut W) -> Result<MarkSummary, AppError> {
    telemetry::initialise(config)?;
    let summary = MarkSession::new(config.strategy, stdout)
        .dry_run(config.dry_run)
        .run(&config.path)?;
    Ok(summary)
}

/// Prints help and version output to `stdout` and usage errors to `stderr`.
fn render_usage<W, E>(error: &clap::Error, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    W: Write,
    E: Write,
{
    let rendered = error.render();
    let _ = if error.use_stderr() {
        write!(stderr, "{rendered}")
    } else {
        write!(stdout, "{rendered}")
    };
    u8::try_from(error.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
