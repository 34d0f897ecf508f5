//! The character cursor the parser drives.
//!
//! Holds the current index, the code value at that index, and the value's
//! width in index units. `rewind` is the only non-monotonic movement; the
//! parser uses it to backtrack out of a partially consumed construct such
//! as a malformed braced quantifier.

use crate::reader::CharMode;
use repat_core::text::TextPos;

/// A cursor over pattern source text.
pub struct Lexer {
    /// The source as UTF-16 code units.
    units: Vec<u16>,
    /// The indexing mode, fixed for the lifetime of the lexer.
    mode: CharMode,
    /// Current index, in code units.
    pos: usize,
    /// The code value at `pos`, or `None` at end of input.
    cp: Option<u32>,
    /// The width of `cp` in index units.
    width: usize,
}

impl Lexer {
    /// Create a lexer positioned at the start of `source`.
    pub fn new(source: &str, unicode_mode: bool) -> Self {
        let mode = if unicode_mode {
            CharMode::Unicode
        } else {
            CharMode::Legacy
        };
        let mut lexer = Self {
            units: source.encode_utf16().collect(),
            mode,
            pos: 0,
            cp: None,
            width: 1,
        };
        lexer.refresh();
        lexer
    }

    /// Recompute the current code value and width from `pos`.
    fn refresh(&mut self) {
        self.cp = self.mode.at(&self.units, self.pos);
        // Width stays stable at end of input so next() past the end is
        // harmless; callers stop on seeing `None`.
        self.width = match self.cp {
            Some(cp) => self.mode.width(cp),
            None => 1,
        };
    }

    /// The current index, in index units.
    #[inline]
    pub fn pos(&self) -> TextPos {
        self.pos as TextPos
    }

    /// The code value under the cursor, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<u32> {
        self.cp
    }

    /// Whether the cursor is at end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cp.is_none()
    }

    /// The source length in index units.
    pub fn source_len(&self) -> TextPos {
        self.units.len() as TextPos
    }

    /// Advance to the next character code.
    pub fn next(&mut self) {
        self.pos += self.width;
        self.refresh();
    }

    /// Consume the current code value if it equals `code`.
    pub fn eat(&mut self, code: u32) -> bool {
        if self.cp == Some(code) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Pure lookahead: whether the current code value equals `code`.
    #[inline]
    pub fn matches(&self, code: u32) -> bool {
        self.cp == Some(code)
    }

    /// Move the cursor back (or forward) to a previously recorded index.
    pub fn rewind(&mut self, pos: TextPos) {
        self.pos = pos as usize;
        self.refresh();
    }
}
