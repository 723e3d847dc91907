//! One marking run over one file.
//!
//! A session reads the target, streams every line through the selected
//! marker into a [`ScratchBuffer`], reports changed lines as they are
//! produced, and finally promotes the buffer over the target. The target is
//! only ever modified by that last rename.

use std::fs::{File, Permissions};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use strmark_syntax::{AstMarker, LineMarker, MarkerSyntax};
use tracing::{debug, info};

use crate::config::Strategy;
use crate::errors::MarkError;
use crate::report::LineReport;
use crate::scratch::ScratchBuffer;

/// Counts gathered during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkSummary {
    /// Lines read from the source.
    pub lines: usize,
    /// Lines whose content changed.
    pub changed: usize,
    /// Whether the rewrite replaced the target.
    pub promoted: bool,
}

/// Drives a marker over a file and reports to `W`.
pub struct MarkSession<'a, W: Write> {
    strategy: Strategy,
    syntax: MarkerSyntax,
    dry_run: bool,
    report: &'a mut W,
}

impl<'a, W: Write> MarkSession<'a, W> {
    /// Creates a session that writes changed-line reports to `report`.
    #[must_use]
    pub fn new(strategy: Strategy, report: &'a mut W) -> Self {
        Self {
            strategy,
            syntax: MarkerSyntax::default(),
            dry_run: false,
            report,
        }
    }

    /// Discards the scratch buffer instead of promoting it.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Marks the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read, if the scratch
    /// buffer cannot be written or promoted, if a report cannot be written,
    /// or if the syntax-tree strategy cannot parse the source. In every case
    /// the target is left unchanged and no scratch file remains.
    pub fn run(&mut self, path: &Path) -> Result<MarkSummary, MarkError> {
        let file = File::open(path).map_err(|source| MarkError::OpenSource {
            path: path.to_path_buf(),
            source,
        })?;
        let permissions = file
            .metadata()
            .map_err(|source| MarkError::OpenSource {
                path: path.to_path_buf(),
                source,
            })?
            .permissions();
        let mut reader = BufReader::new(file);

        let mut scratch = ScratchBuffer::create_for(path)?;
        let mut summary = MarkSummary::default();
        match self.strategy {
            Strategy::Line => self.mark_lines(path, &mut reader, &mut scratch, &mut summary)?,
            Strategy::Ast => self.mark_tree(path, &mut reader, &mut scratch, &mut summary)?,
        }

        self.finish(path, scratch, permissions, &mut summary)?;
        Ok(summary)
    }

    fn mark_lines<R: BufRead>(
        &mut self,
        path: &Path,
        reader: &mut R,
        scratch: &mut ScratchBuffer,
        summary: &mut MarkSummary,
    ) -> Result<(), MarkError> {
        let marker = LineMarker::new(self.syntax.clone())?;
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|source| MarkError::read_source(path, source))?;
            if read == 0 {
                return Ok(());
            }

            let marked = marker.mark_line(&line);
            self.emit(&line, &marked, scratch, summary)?;
        }
    }

    fn mark_tree<R: Read>(
        &mut self,
        path: &Path,
        reader: &mut R,
        scratch: &mut ScratchBuffer,
        summary: &mut MarkSummary,
    ) -> Result<(), MarkError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| MarkError::read_source(path, source))?;
        let source = String::from_utf8(bytes).map_err(|_| MarkError::NotUtf8 {
            path: path.to_path_buf(),
        })?;

        let outcome = AstMarker::new(self.syntax.clone()).mark(&source)?;
        let original: Vec<&str> = source.split_inclusive('\n').collect();
        let marked: Vec<&str> = outcome.output().split_inclusive('\n').collect();
        if original.len() != marked.len() {
            return Err(MarkError::LineCountChanged {
                before: original.len(),
                after: marked.len(),
            });
        }

        for (before, after) in original.iter().zip(&marked) {
            self.emit(before.as_bytes(), after.as_bytes(), scratch, summary)?;
        }
        Ok(())
    }

    fn emit(
        &mut self,
        original: &[u8],
        marked: &[u8],
        scratch: &mut ScratchBuffer,
        summary: &mut MarkSummary,
    ) -> Result<(), MarkError> {
        scratch.write_all(marked)?;
        summary.lines = summary.lines.saturating_add(1);

        if marked != original {
            summary.changed = summary.changed.saturating_add(1);
            LineReport::new(summary.lines, marked)
                .write_to(self.report)
                .map_err(MarkError::Report)?;
        }
        Ok(())
    }

    fn finish(
        &self,
        path: &Path,
        scratch: ScratchBuffer,
        permissions: Permissions,
        summary: &mut MarkSummary,
    ) -> Result<(), MarkError> {
        if self.dry_run || summary.changed == 0 {
            debug!(path = %path.display(), dry_run = self.dry_run, "leaving target untouched");
            scratch.discard();
            return Ok(());
        }

        scratch.promote(path, permissions)?;
        summary.promoted = true;
        info!(
            path = %path.display(),
            strategy = %self.strategy,
            lines = summary.lines,
            changed = summary.changed,
            "rewrote file"
        );
        Ok(())
    }
}
