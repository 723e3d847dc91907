//! Error types for the marking runtime.

use std::io;
use std::path::PathBuf;

use strmark_syntax::SyntaxError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Errors raised while marking a single file.
///
/// Every variant leaves the target file in its pre-run state: the scratch
/// buffer is dropped, and so removed, before the error reaches the caller.
#[derive(Debug, Error)]
pub enum MarkError {
    /// The source path could not be opened for reading.
    #[error("failed to open {}: {source}", path.display())]
    OpenSource {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// Reading the source failed part way through.
    #[error("failed to read {}: {source}", path.display())]
    ReadSource {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// The syntax-tree strategy needs UTF-8 text.
    #[error("{} is not valid UTF-8 text", path.display())]
    NotUtf8 {
        /// Path being read.
        path: PathBuf,
    },
    /// The scratch buffer could not be created.
    #[error("failed to create scratch buffer in {}: {source}", path.display())]
    CreateScratch {
        /// Directory the buffer was created in.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// Writing to the scratch buffer failed.
    #[error("failed to write scratch buffer: {0}")]
    WriteScratch(#[source] io::Error),
    /// The scratch buffer could not replace the target.
    #[error("failed to replace {}: {source}", path.display())]
    Promote {
        /// Target path.
        path: PathBuf,
        /// Underlying IO failure.
        source: io::Error,
    },
    /// A changed-line report could not be written.
    #[error("failed to report changed line: {0}")]
    Report(#[source] io::Error),
    /// A rewrite added or removed lines.
    #[error("rewrite changed the line count from {before} to {after}")]
    LineCountChanged {
        /// Lines in the original source.
        before: usize,
        /// Lines in the rewritten source.
        after: usize,
    },
    /// Parsing or splicing failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl MarkError {
    pub(crate) fn read_source(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadSource {
            path: path.into(),
            source,
        }
    }
}

/// Top-level failures surfaced by [`crate::run`].
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Mark(#[from] MarkError),
}
