//! Scratch buffer that stages a rewrite before it replaces the target.
//!
//! The buffer is a uniquely named temporary file in the target's directory,
//! so promotion is a single same-filesystem rename. Until it is promoted the
//! buffer is owned by a `NamedTempFile`, which removes it on drop; every
//! early return and error path therefore cleans up without extra code.

use std::fs::Permissions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};

use crate::errors::MarkError;

const SCRATCH_SUFFIX: &str = ".strmark";

/// Staging file for rewritten content.
#[derive(Debug)]
pub struct ScratchBuffer {
    writer: BufWriter<NamedTempFile>,
}

impl ScratchBuffer {
    /// Creates a scratch buffer next to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkError::CreateScratch`] if the directory is not
    /// writable.
    pub fn create_for(target: &Path) -> Result<Self, MarkError> {
        let directory = scratch_directory(target);
        let name = target
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("source");

        let file = Builder::new()
            .prefix(&format!(".{name}."))
            .suffix(SCRATCH_SUFFIX)
            .tempfile_in(&directory)
            .map_err(|source| MarkError::CreateScratch {
                path: directory.clone(),
                source,
            })?;
        debug!(scratch = %file.path().display(), "created scratch buffer");

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Appends bytes to the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MarkError::WriteScratch`] if the write fails.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), MarkError> {
        self.writer.write_all(bytes).map_err(MarkError::WriteScratch)
    }

    /// Atomically replaces `target` with the buffered content.
    ///
    /// Content is flushed and fsync'd before the rename. `permissions` is
    /// applied first so the replacement keeps the original mode bits. On
    /// failure the buffer is removed and `target` is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MarkError::WriteScratch`] if flushing fails or
    /// [`MarkError::Promote`] if the rename fails.
    pub fn promote(self, target: &Path, permissions: Permissions) -> Result<(), MarkError> {
        let file = self
            .writer
            .into_inner()
            .map_err(|error| MarkError::WriteScratch(error.into_error()))?;

        file.as_file()
            .set_permissions(permissions)
            .map_err(MarkError::WriteScratch)?;
        file.as_file().sync_all().map_err(MarkError::WriteScratch)?;

        file.persist(target).map_err(|error| MarkError::Promote {
            path: target.to_path_buf(),
            source: error.error,
        })?;
        debug!(target = %target.display(), "promoted scratch buffer");
        Ok(())
    }

    /// Closes and removes the buffer without touching any target.
    pub fn discard(self) {
        let (file, _) = self.writer.into_parts();
        let path = file.path().to_path_buf();
        if let Err(error) = file.close() {
            warn!(scratch = %path.display(), %error, "failed to remove scratch buffer");
        }
    }
}

fn scratch_directory(target: &Path) -> PathBuf {
    target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
