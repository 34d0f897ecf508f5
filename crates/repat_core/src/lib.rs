//! repat_core: Core utilities for the repat regular expression parser.
//!
//! Provides the source span type shared by the lexer, the syntax tree,
//! and diagnostics.

pub mod text;

// Re-export commonly used types
pub use text::{Loc, TextPos};
