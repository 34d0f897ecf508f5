//! repat_parser: Recursive descent parser for ECMAScript regular
//! expression patterns.
//!
//! Consumes character codes from the lexer and builds a parent-linked
//! syntax tree in an id-arena, accumulating recoverable grammar errors
//! instead of aborting.

mod parser;

pub use parser::{ParseResult, Parser};
