//! End-to-end tests for strmark-syntax using insta for snapshot testing.
//!
//! These tests run realistic Ruby sources through the public API and pin
//! the marked output.

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use strmark_syntax::{AstMarker, LineMarker, MarkerSyntax, SyntaxError};

const SCRIPT: &str = r##"require "optparse"
require_relative "lib/greeter"

options = { "name" => "world" }
banner = "Usage: greet [options]"
puts _("Hello"), "#{options["name"]}!"
warn "Unknown flag" if ARGV.include?("--bad")
"##;

/// Fixture providing the default line marker.
#[fixture]
fn line_marker() -> LineMarker {
    LineMarker::new(MarkerSyntax::default()).unwrap_or_else(|err| panic!("pattern: {err}"))
}

fn mark_lines(marker: &LineMarker, source: &str) -> String {
    source
        .split_inclusive('\n')
        .map(|line| String::from_utf8_lossy(&marker.mark_line(line.as_bytes())).into_owned())
        .collect()
}

// =============================================================================
// Happy Path: Line Marking
// =============================================================================

#[rstest]
fn line_marker_rewrites_script(line_marker: LineMarker) {
    assert_snapshot!(mark_lines(&line_marker, SCRIPT), @r##"
    require "optparse"
    require_relative "lib/greeter"

    options = { _("name") => _("world") }
    banner = _("Usage: greet [options]")
    puts _("Hello"), _("#{options[")name_("]}!")
    warn _("Unknown flag") if ARGV.include?(_("--bad"))
    "##);
}

#[rstest]
fn line_marker_second_pass_is_stable(line_marker: LineMarker) {
    let once = mark_lines(&line_marker, SCRIPT);
    let twice = mark_lines(&line_marker, &once);
    assert_eq!(once, twice);
}

// =============================================================================
// Happy Path: Syntax-Tree Marking
// =============================================================================

#[test]
fn tree_marker_rewrites_script() {
    let outcome = AstMarker::default()
        .mark(SCRIPT)
        .unwrap_or_else(|err| panic!("mark: {err}"));

    assert_eq!(outcome.wrapped(), 6);
    assert_snapshot!(outcome.output(), @r##"
    require "optparse"
    require_relative "lib/greeter"

    options = { _("name") => _("world") }
    banner = _("Usage: greet [options]")
    puts _("Hello"), _("#{options["name"]}!")
    warn _("Unknown flag") if ARGV.include?(_("--bad"))
    "##);
}

// =============================================================================
// Unhappy Path
// =============================================================================

#[test]
fn tree_marker_reports_parse_error_location() {
    let Err(error) = AstMarker::default().mark("puts \"ok\"\nclass Broken\n  def x(\n") else {
        panic!("expected a parse error");
    };

    assert!(matches!(error, SyntaxError::ParseError { .. }));
    assert!(error.to_string().starts_with("failed to parse ruby source: "));
}
