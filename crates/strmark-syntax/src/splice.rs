//! Text-splice engine for syntax-tree rewrites.
//!
//! Rewrites are expressed as insertions at byte offsets of the original
//! source rather than as replacements, so no original byte is ever lost.
//! Insertions are applied in a single forward pass over the source.

use std::ops::Range;

use crate::error::SyntaxError;

/// Which side of an offset an insertion binds to.
///
/// At a shared offset, text that closes an earlier node must land before
/// text that opens a later one, so `After` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Side {
    After,
    Before,
}

/// A single insertion into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Splice {
    offset: usize,
    side: Side,
    text: String,
}

/// An ordered collection of insertions against one source text.
#[derive(Debug, Clone, Default)]
pub struct SpliceSet {
    splices: Vec<Splice>,
}

impl SpliceSet {
    /// Creates an empty splice set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            splices: Vec::new(),
        }
    }

    /// Inserts `text` in front of whatever starts at `offset`.
    pub fn insert_before(&mut self, offset: usize, text: impl Into<String>) {
        self.push(offset, Side::Before, text.into());
    }

    /// Inserts `text` behind whatever ends at `offset`.
    pub fn insert_after(&mut self, offset: usize, text: impl Into<String>) {
        self.push(offset, Side::After, text.into());
    }

    /// Surrounds a byte range with `open` and `close`.
    pub fn wrap(&mut self, range: Range<usize>, open: &str, close: &str) {
        self.insert_before(range.start, open);
        self.insert_after(range.end, close);
    }

    fn ordered(&self) -> Vec<&Splice> {
        let mut ordered: Vec<_> = self.splices.iter().collect();
        ordered.sort_by_key(|splice| (splice.offset, splice.side));
        ordered
    }

    /// Applies every insertion to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if an offset lies past the end of the source or
    /// inside a multi-byte character.
    pub fn apply(&self, source: &str) -> Result<String, SyntaxError> {
        let inserted: usize = self.splices.iter().map(|s| s.text.len()).sum();
        let mut output = String::with_capacity(source.len().saturating_add(inserted));
        let mut cursor = 0;

        for splice in self.ordered() {
            let chunk = source.get(cursor..splice.offset).ok_or_else(|| {
                SyntaxError::splice(splice.offset, "offset is outside the source text")
            })?;
            output.push_str(chunk);
            output.push_str(&splice.text);
            cursor = splice.offset;
        }

        let tail = source
            .get(cursor..)
            .ok_or_else(|| SyntaxError::splice(cursor, "offset is outside the source text"))?;
        output.push_str(tail);
        Ok(output)
    }

    fn push(&mut self, offset: usize, side: Side, text: String) {
        self.splices.push(Splice { offset, side, text });
    }
}
