//! Mode-aware character code reader.
//!
//! The two indexing modes of the ECMAScript pattern grammar differ only in
//! how they read one character and how far the cursor then moves. The mode
//! is chosen once, at lexer construction.

use crate::char_codes::{combine_surrogates, is_high_surrogate, is_low_surrogate};

/// How the source's UTF-16 code units are grouped into character codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharMode {
    /// One code unit per step; surrogate pairs are traversed as two
    /// separate steps of width 1.
    Legacy,
    /// One scalar value per step; a surrogate pair is combined into a
    /// single code value of width 2.
    Unicode,
}

impl CharMode {
    /// The code value at `index`, or `None` at or past end of input.
    pub fn at(self, units: &[u16], index: usize) -> Option<u32> {
        let unit = *units.get(index)? as u32;
        match self {
            CharMode::Legacy => Some(unit),
            CharMode::Unicode => {
                if is_high_surrogate(unit) {
                    if let Some(&next) = units.get(index + 1) {
                        let next = next as u32;
                        if is_low_surrogate(next) {
                            return Some(combine_surrogates(unit, next));
                        }
                    }
                }
                // Lone surrogates read as themselves.
                Some(unit)
            }
        }
    }

    /// How many index units the code value at the cursor occupies.
    pub fn width(self, code: u32) -> usize {
        match self {
            CharMode::Legacy => 1,
            CharMode::Unicode => {
                if code > 0xFFFF {
                    2
                } else {
                    1
                }
            }
        }
    }
}
