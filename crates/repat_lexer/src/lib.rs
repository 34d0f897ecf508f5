//! repat_lexer: Character-level cursor over regular expression source text.
//!
//! The lexer walks pattern source as UTF-16 code units. In legacy mode each
//! code unit is one step (surrogate halves are seen separately); in Unicode
//! mode a surrogate pair is one step of width 2 whose code value is the
//! combined scalar. Index arithmetic is identical in both modes, so source
//! offsets always line up.

pub mod char_codes;
mod lexer;
mod reader;

pub use lexer::Lexer;
pub use reader::CharMode;
