//! repat_tests: Integration tests for the pattern parser.
//!
//! The tests live in `tests/`; this crate only provides the shared
//! harness: parse a pattern and serialize the tree to its structural
//! JSON form.

use repat_parser::{ParseResult, Parser};
use serde_json::Value;

/// Parse `source` and return the result plus the serialized tree.
pub fn parse_to_json(source: &str, unicode_mode: bool) -> (ParseResult, Value) {
    let result = Parser::new(source, unicode_mode).parse_pattern();
    let value = repat_printer::to_json(&result.arena, result.pattern);
    (result, value)
}

/// Parse `source`, asserting the parse was clean, and return the tree.
pub fn parse_clean(source: &str, unicode_mode: bool) -> Value {
    let (result, value) = parse_to_json(source, unicode_mode);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        result.diagnostics.diagnostics()
    );
    value
}
