//! Regex-based line marking.
//!
//! Literal detection here is lexical: a literal is a double quote, a run of
//! non-quote bytes, and a closing double quote on the same line. Escaped
//! quotes, nested quotes, and literals spanning lines are not understood.
//!
//! The `regex` crate has no look-behind, so a literal that is already marked
//! is recognised by capturing the optional marker-open text in front of it.
//! Such matches are written back verbatim, which also consumes them so that
//! scanning resumes after the marked literal.

use std::borrow::Cow;

use regex::bytes::{Captures, Regex};

use crate::error::SyntaxError;
use crate::marker::{MARKER_CLOSE, MarkerSyntax};

const OPEN_GROUP: &str = "open";

/// Wraps unmarked double-quoted literals one line at a time.
#[derive(Debug, Clone)]
pub struct LineMarker {
    syntax: MarkerSyntax,
    open: Vec<u8>,
    literal: Regex,
}

impl LineMarker {
    /// Builds a line marker for the given conventions.
    ///
    /// # Errors
    ///
    /// Returns an error if the literal pattern cannot be compiled.
    pub fn new(syntax: MarkerSyntax) -> Result<Self, SyntaxError> {
        let open = syntax.open();
        let pattern = format!(
            r#"(?P<{OPEN_GROUP}>{})?"(?-u:[^"])*""#,
            regex::escape(&open)
        );
        let literal = Regex::new(&pattern).map_err(|e| SyntaxError::pattern(e.to_string()))?;

        Ok(Self {
            syntax,
            open: open.into_bytes(),
            literal,
        })
    }

    /// Returns whether the line is an import statement that must be copied
    /// verbatim.
    #[must_use]
    pub fn is_import(&self, line: &[u8]) -> bool {
        self.syntax.is_import_line(line)
    }

    /// Marks every unmarked literal on a line.
    ///
    /// The line may carry its terminator; it is preserved untouched. Import
    /// lines are returned borrowed and unchanged. Compare the result with the
    /// input to learn whether anything was wrapped.
    #[must_use]
    pub fn mark_line<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        if self.is_import(line) {
            return Cow::Borrowed(line);
        }

        self.literal
            .replace_all(line, |caps: &Captures<'_>| self.wrap_capture(caps))
    }

    fn wrap_capture(&self, caps: &Captures<'_>) -> Vec<u8> {
        let matched = caps.get(0).map(|m| m.as_bytes()).unwrap_or_default();
        if caps.name(OPEN_GROUP).is_some() {
            return matched.to_vec();
        }

        let mut wrapped =
            Vec::with_capacity(self.open.len() + matched.len() + MARKER_CLOSE.len());
        wrapped.extend_from_slice(&self.open);
        wrapped.extend_from_slice(matched);
        wrapped.extend_from_slice(MARKER_CLOSE.as_bytes());
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn marker() -> LineMarker {
        LineMarker::new(MarkerSyntax::default()).expect("default pattern compiles")
    }

    fn mark(marker: &LineMarker, line: &str) -> String {
        String::from_utf8(marker.mark_line(line.as_bytes()).into_owned()).expect("utf-8")
    }

    #[rstest]
    #[case("x = \"hello\"", "x = _(\"hello\")")]
    #[case("puts \"a\", \"b\"", "puts _(\"a\"), _(\"b\")")]
    #[case("y = _(\"already\")", "y = _(\"already\")")]
    #[case("_(\"a\") + \"b\"", "_(\"a\") + _(\"b\")")]
    #[case("empty = \"\"", "empty = _(\"\")")]
    #[case("single = 'quoted'", "single = 'quoted'")]
    #[case("odd = \"open", "odd = \"open")]
    #[case("label = \"caf\u{e9}\"", "label = _(\"caf\u{e9}\")")]
    fn mark_line_wraps_unmarked_literals(
        marker: LineMarker,
        #[case] line: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(mark(&marker, line), expected);
    }

    #[rstest]
    fn mark_line_leaves_require_lines_alone(marker: LineMarker) {
        let line = b"require \"foo\"\n";
        let marked = marker.mark_line(line);

        assert!(matches!(marked, Cow::Borrowed(_)));
        assert_eq!(marked.as_ref(), line);
    }

    #[rstest]
    #[case("x = \"a\"\n")]
    #[case("x = \"a\"\r\n")]
    #[case("x = \"a\"")]
    fn mark_line_preserves_terminators(marker: LineMarker, #[case] line: &str) {
        let marked = mark(&marker, line);
        let terminator = line.trim_end_matches(['\r', '\n']).len();
        assert!(marked.ends_with(line.get(terminator..).unwrap_or_default()));
        assert_eq!(marked.lines().count(), line.lines().count());
    }

    #[rstest]
    fn mark_line_is_idempotent(marker: LineMarker) {
        let once = mark(&marker, "puts \"a\", _(\"b\"), \"c\"");
        let twice = mark(&marker, &once);
        assert_eq!(once, twice);
    }

    #[rstest]
    fn mark_line_accepts_invalid_utf8(marker: LineMarker) {
        let line = b"x = \"\xff\xfe\"\n";
        let marked = marker.mark_line(line);
        assert_eq!(marked.as_ref(), b"x = _(\"\xff\xfe\")\n");
    }

    #[test]
    fn custom_marker_names_are_escaped() {
        let marker = LineMarker::new(MarkerSyntax::new("t.", ["import"])).expect("pattern");
        let marked = marker.mark_line(b"a = t.(\"x\") + \"y\"");
        assert_eq!(marked.as_ref(), b"a = t.(\"x\") + t.(\"y\")");
    }
}
