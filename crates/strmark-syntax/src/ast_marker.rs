//! Syntax-tree marking for Ruby source.
//!
//! The marker walks a Tree-sitter tree and wraps string nodes with marker
//! text, leaving the original bytes in place. Subtrees that must not be
//! marked are pruned during the walk:
//!
//! - calls to the marker function itself, so marking is idempotent
//! - receiverless calls to an import keyword (`require "json"`)
//! - index arguments of element references (`h["key"]`) and explicit
//!   bracket-method calls (`h.[]("key")`)
//!
//! A wrapped node is never descended into, so strings nested inside an
//! interpolation stay as they are.

use std::ops::Range;

use tracing::debug;

use crate::error::SyntaxError;
use crate::marker::{MARKER_CLOSE, MarkerSyntax};
use crate::parser::{ParseResult, Parser};
use crate::splice::SpliceSet;

/// Node kinds that are never translatable text.
const OPAQUE_KINDS: &[&str] = &[
    "delimited_symbol",
    "regex",
    "subshell",
    "string_array",
    "symbol_array",
    "heredoc_body",
    "comment",
];

/// What the walk does with a node.
#[derive(Debug, PartialEq, Eq)]
enum Visit {
    Wrap(Range<usize>),
    Skip,
    Only(&'static str),
    Descend,
}

/// Result of marking a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
    output: String,
    wrapped: usize,
}

impl MarkOutcome {
    /// Returns the marked source text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns the number of literals that were wrapped.
    #[must_use]
    pub const fn wrapped(&self) -> usize {
        self.wrapped
    }

}

/// Wraps unmarked Ruby string literals by walking the syntax tree.
#[derive(Debug, Clone, Default)]
pub struct AstMarker {
    syntax: MarkerSyntax,
}

impl AstMarker {
    /// Creates a syntax-tree marker for the given conventions.
    #[must_use]
    pub const fn new(syntax: MarkerSyntax) -> Self {
        Self { syntax }
    }

    /// Marks every unmarked string literal in `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be initialised, if the source
    /// contains syntax errors (rewriting a misunderstood tree could corrupt
    /// the file), or if a splice falls outside the source.
    pub fn mark(&self, source: &str) -> Result<MarkOutcome, SyntaxError> {
        let mut parser = Parser::new()?;
        let parsed = parser.parse(source)?;
        if parsed.has_errors() {
            let detail = parsed
                .errors()
                .first()
                .map_or_else(|| "unrecognised syntax".to_owned(), ToString::to_string);
            return Err(SyntaxError::parse(detail));
        }

        let (splices, wrapped) = self.plan(&parsed);
        let output = splices.apply(source)?;
        debug!(wrapped, "marked ruby source");

        Ok(MarkOutcome { output, wrapped })
    }

    /// Computes the insertions that mark a parsed source, together with the
    /// number of nodes they wrap.
    fn plan(&self, parsed: &ParseResult) -> (SpliceSet, usize) {
        let open = self.syntax.open();
        let mut walk = Walk {
            marker: self,
            source: parsed.source().as_bytes(),
            open: &open,
            splices: SpliceSet::new(),
            wrapped: 0,
        };
        walk.visit(parsed.root_node());
        (walk.splices, walk.wrapped)
    }

    fn classify(&self, node: tree_sitter::Node<'_>, source: &[u8]) -> Visit {
        match node.kind() {
            "string" | "chained_string" | "heredoc_beginning" => Visit::Wrap(node.byte_range()),
            "element_reference" => Visit::Only("object"),
            "call" => self.classify_call(node, source),
            kind if OPAQUE_KINDS.contains(&kind) => Visit::Skip,
            _ => Visit::Descend,
        }
    }

    fn classify_call(&self, node: tree_sitter::Node<'_>, source: &[u8]) -> Visit {
        let Some(method) = node
            .child_by_field_name("method")
            .and_then(|method| method.utf8_text(source).ok())
        else {
            return Visit::Descend;
        };

        if method == self.syntax.function() {
            return Visit::Skip;
        }
        if method.starts_with('[') {
            return Visit::Only("receiver");
        }
        let has_receiver = node.child_by_field_name("receiver").is_some();
        if !has_receiver && self.syntax.is_import_keyword(method) {
            return Visit::Skip;
        }
        Visit::Descend
    }
}

struct Walk<'a> {
    marker: &'a AstMarker,
    source: &'a [u8],
    open: &'a str,
    splices: SpliceSet,
    wrapped: usize,
}

impl Walk<'_> {
    fn visit(&mut self, node: tree_sitter::Node<'_>) {
        match self.marker.classify(node, self.source) {
            Visit::Wrap(range) => {
                self.splices.wrap(range, self.open, MARKER_CLOSE);
                self.wrapped = self.wrapped.saturating_add(1);
            }
            Visit::Skip => {}
            Visit::Only(field) => {
                if let Some(child) = node.child_by_field_name(field) {
                    self.visit(child);
                }
            }
            Visit::Descend => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn marker() -> AstMarker {
        AstMarker::default()
    }

    #[rstest]
    #[case("x = \"hello\"\n", "x = _(\"hello\")\n")]
    #[case("x = 'single'\n", "x = _('single')\n")]
    #[case("puts \"a\", \"b\"\n", "puts _(\"a\"), _(\"b\")\n")]
    #[case("puts \"hi #{name}\"\n", "puts _(\"hi #{name}\")\n")]
    #[case("title = \"a\" \"b\"\n", "title = _(\"a\" \"b\")\n")]
    #[case("h[\"k\"] = \"v\"\n", "h[\"k\"] = _(\"v\")\n")]
    #[case("fetch(\"x\")[\"k\"]\n", "fetch(_(\"x\"))[\"k\"]\n")]
    fn mark_wraps_string_nodes(marker: AstMarker, #[case] source: &str, #[case] expected: &str) {
        let outcome = marker.mark(source).expect("mark");
        assert_eq!(outcome.output(), expected);
    }

    #[rstest]
    #[case("require \"json\"\n")]
    #[case("require_relative \"support/helper\"\n")]
    #[case("y = _(\"already\")\n")]
    #[case("y = _ \"already\"\n")]
    #[case("value = h[\"key\"]\n")]
    #[case("sym = :\"quoted\"\n")]
    #[case("words = %w[a b]\n")]
    #[case("re = /a\"b/\n")]
    #[case("# \"comment\"\n")]
    fn mark_leaves_excluded_nodes_alone(marker: AstMarker, #[case] source: &str) {
        let outcome = marker.mark(source).expect("mark");
        assert_eq!(outcome.wrapped(), 0);
        assert_eq!(outcome.output(), source);
    }

    #[rstest]
    fn mark_does_not_descend_into_interpolation(marker: AstMarker) {
        let outcome = marker
            .mark("puts \"#{ok ? \"yes\" : \"no\"}\"\n")
            .expect("mark");
        assert_eq!(outcome.wrapped(), 1);
        assert_eq!(outcome.output(), "puts _(\"#{ok ? \"yes\" : \"no\"}\")\n");
    }

    #[rstest]
    fn mark_wraps_heredoc_at_opening_token(marker: AstMarker) {
        let source = "text = <<~EOS\n  Hello \"there\"\nEOS\n";
        let outcome = marker.mark(source).expect("mark");
        assert_eq!(
            outcome.output(),
            "text = _(<<~EOS)\n  Hello \"there\"\nEOS\n"
        );
    }

    #[rstest]
    fn mark_is_idempotent(marker: AstMarker) {
        let once = marker
            .mark("puts \"a\"\nlabel = \"b #{c}\"\n")
            .expect("first pass");
        let twice = marker.mark(once.output()).expect("second pass");
        assert_eq!(twice.wrapped(), 0);
        assert_eq!(twice.output(), once.output());
    }

    #[rstest]
    fn mark_rejects_source_with_syntax_errors(marker: AstMarker) {
        let error = marker.mark("def broken(\n").expect_err("syntax error");
        assert!(matches!(error, SyntaxError::ParseError { .. }));
    }

    #[rstest]
    fn plan_counts_each_wrapped_node_once(marker: AstMarker) {
        let mut parser = Parser::new().expect("parser");
        let parsed = parser
            .parse("a = \"x\"\nb = \"y\" \"z\"\nc = _(\"w\")\n")
            .expect("parse");
        let (plan, wrapped) = marker.plan(&parsed);

        assert_eq!(wrapped, 2);
        assert_eq!(
            plan.apply(parsed.source()).expect("apply"),
            "a = _(\"x\")\nb = _(\"y\" \"z\")\nc = _(\"w\")\n"
        );
    }

    #[rstest]
    fn wrapped_count_matches_literals_in_mixed_source(marker: AstMarker) {
        let outcome = marker
            .mark("puts \"a\", h[\"k\"], _(\"b\")\nwarn <<~EOS\n  body\nEOS\n")
            .expect("mark");
        assert_eq!(outcome.wrapped(), 2);
    }
}
