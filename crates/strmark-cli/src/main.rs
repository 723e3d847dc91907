//! CLI entrypoint for the strmark string-marking tool.
//!
//! The binary delegates to [`strmark_cli::run`], which parses arguments,
//! installs telemetry, and rewrites the named file.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    strmark_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
