//! Crate-level tests for strmark-syntax.
