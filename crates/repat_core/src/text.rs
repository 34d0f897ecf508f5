//! Source location type for syntax tree nodes and diagnostics.
//!
//! Positions are measured in the index unit of the active lexer mode:
//! UTF-16 code units in legacy mode, Unicode code points (with surrogate
//! pairs counted as two units) in Unicode mode. Either way the offsets line
//! up with the lexer's index arithmetic.

use serde::Serialize;
use std::fmt;

/// A position in pattern source text.
pub type TextPos = u32;

/// A half-open span `[start, end)` over pattern source text.
///
/// While a node is still under construction its end is `Loc::UNSET`; the
/// parser sets the real end exactly once, when it leaves the node's rule.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Loc {
    /// The offset where this span starts.
    pub start: TextPos,
    /// The offset where this span ends (exclusive).
    pub end: TextPos,
}

impl Loc {
    /// Sentinel for a span whose end has not been set yet.
    pub const UNSET: TextPos = TextPos::MAX;

    /// Create a closed span from start and end offsets.
    #[inline]
    pub fn new(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// Create a span that is still open on the right.
    #[inline]
    pub fn open(start: TextPos) -> Self {
        Self {
            start,
            end: Self::UNSET,
        }
    }

    /// Whether the end of this span has been set.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.end != Self::UNSET
    }

    /// Close this span at the given end offset.
    #[inline]
    pub fn close(&mut self, end: TextPos) {
        debug_assert!(!self.is_closed());
        debug_assert!(end >= self.start);
        self.end = end;
    }

    /// The number of index units this span covers.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.start
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end
    }
}

impl fmt::Debug for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closed() {
            write!(f, "{}..{}", self.start, self.end)
        } else {
            write!(f, "{}..?", self.start)
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
