//! String-literal marking for internationalisation tooling.
//!
//! This crate finds translatable string literals in source text and wraps
//! them in a translation-marker call such as `_("hello")`. Two strategies are
//! provided:
//!
//! - **Line marking** via [`LineMarker`], a regex-based lexical approximation
//!   that works on one line at a time and never needs the whole file in
//!   memory
//! - **Syntax-tree marking** via [`AstMarker`], which parses Ruby source with
//!   Tree-sitter and splices marker text around string nodes
//!
//! Both strategies share the conventions held by [`MarkerSyntax`]: the
//! marker function name and the keywords that introduce import statements.
//!
//! # Example: Line Marking
//!
//! ```
//! use strmark_syntax::{LineMarker, MarkerSyntax};
//!
//! let marker = LineMarker::new(MarkerSyntax::default())?;
//! let marked = marker.mark_line(b"puts \"a\", \"b\"\n");
//!
//! assert_eq!(marked.as_ref(), b"puts _(\"a\"), _(\"b\")\n");
//! # Ok::<(), strmark_syntax::SyntaxError>(())
//! ```
//!
//! # Example: Syntax-Tree Marking
//!
//! ```
//! use strmark_syntax::{AstMarker, MarkerSyntax};
//!
//! let marker = AstMarker::new(MarkerSyntax::default());
//! let outcome = marker.mark("greeting = \"hi #{name}\"\n")?;
//!
//! assert_eq!(outcome.output(), "greeting = _(\"hi #{name}\")\n");
//! # Ok::<(), strmark_syntax::SyntaxError>(())
//! ```

mod ast_marker;
mod error;
mod line_marker;
mod marker;
mod parser;
mod position;
mod splice;

pub use ast_marker::{AstMarker, MarkOutcome};
pub use error::SyntaxError;
pub use line_marker::LineMarker;
pub use marker::{MARKER_CLOSE, MarkerSyntax};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};

#[cfg(test)]
mod tests;
