//! Console reports for changed lines.

use std::io::{self, Write};

/// A rewritten line as announced on standard output.
///
/// The rendered form is `"<number>: <content>"` followed by one extra
/// newline. `content` keeps its own terminator, so a terminated line is
/// followed by a blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineReport<'a> {
    number: usize,
    content: &'a [u8],
}

impl<'a> LineReport<'a> {
    /// Creates a report for a one-based line number and its new content.
    #[must_use]
    pub const fn new(number: usize, content: &'a [u8]) -> Self {
        Self { number, content }
    }

    /// Writes and flushes the report so it is visible immediately.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}: ", self.number)?;
        out.write_all(self.content)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}
