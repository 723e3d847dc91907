//! Error types for marking operations.
//!
//! This module provides structured error types for all operations in the
//! `strmark-syntax` crate, including parsing, splicing, and pattern setup.

use thiserror::Error;

/// Errors from marking operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for Ruby.
    #[error("failed to initialise ruby parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// The source could not be parsed into a usable syntax tree.
    #[error("failed to parse ruby source: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// The literal-matching expression could not be built.
    #[error("invalid literal pattern: {message}")]
    PatternError {
        /// Description of the compilation failure.
        message: String,
    },

    /// A splice could not be applied to the source text.
    #[error("splice failed at byte {offset}: {message}")]
    SpliceError {
        /// Byte offset of the rejected splice.
        offset: usize,
        /// Description of the failure.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates a pattern compilation error.
    #[must_use]
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::PatternError {
            message: message.into(),
        }
    }

    /// Creates a splice error.
    #[must_use]
    pub fn splice(offset: usize, message: impl Into<String>) -> Self {
        Self::SpliceError {
            offset,
            message: message.into(),
        }
    }
}
