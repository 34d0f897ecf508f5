//! repat_diagnostics: Diagnostic messages and error reporting for the
//! regular expression parser.
//!
//! Grammar errors are values, not panics: the parser records them in a
//! [`DiagnosticCollection`] and keeps building a best-effort tree, so a
//! single malformed construct never discards the rest of the parse.

use repat_core::text::Loc;
use std::fmt;
use thiserror::Error;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 201).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message text.
    pub message: &'static str,
}

/// A realized diagnostic with an optional source span.
///
/// Implements `std::error::Error`, so callers that only care about
/// pass/fail can treat a diagnostic like any other error value.
#[derive(Debug, Clone, Error)]
#[error("{category} RE{code}: {message_text}")]
pub struct Diagnostic {
    /// The source span this diagnostic points at, if any.
    pub span: Option<Loc>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage) -> Self {
        Self {
            span: None,
            message_text: message.message.to_string(),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a diagnostic pointing at a source span.
    pub fn with_span(span: Loc, message: &DiagnosticMessage) -> Self {
        Self {
            span: Some(span),
            message_text: message.message.to_string(),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// A collection of diagnostics accumulated during a parse.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by span start position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| d.span.map(|s| s.start).unwrap_or(0));
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Structural invariant violations (100-199)
    //
    // These indicate a bug in the parser itself, never bad input: the tree
    // cursor was not on the node kind a rule requires.
    // ========================================================================
    pub const PARENT_OF_ALTERNATIVE_MUST_BE_PATTERN: DiagnosticMessage = diag!(101, Error, "The parent of Alternative must be Pattern.");
    pub const PARENT_OF_CHARACTER_MUST_BE_ALTERNATIVE_OR_CLASS: DiagnosticMessage = diag!(102, Error, "The parent of Character must be Alternative or CharacterClass.");
    pub const PARENT_OF_ANY_CHARACTER_SET_MUST_BE_ALTERNATIVE: DiagnosticMessage = diag!(103, Error, "The parent of AnyCharacterSet must be Alternative.");
    pub const PARENT_OF_QUANTIFIER_MUST_BE_ALTERNATIVE: DiagnosticMessage = diag!(104, Error, "The parent of Quantifier must be Alternative.");
    pub const PARENT_OF_CHARACTER_CLASS_MUST_BE_ALTERNATIVE: DiagnosticMessage = diag!(105, Error, "The parent of CharacterClass must be Alternative.");
    pub const PARENT_OF_CLASS_RANGE_MUST_BE_CHARACTER_CLASS: DiagnosticMessage = diag!(106, Error, "The parent of CharacterClassRange must be CharacterClass.");
    pub const CLASS_RANGE_ENDPOINTS_MUST_BE_CHARACTERS: DiagnosticMessage = diag!(107, Error, "CharacterClassRange endpoints must be literal Characters.");
    pub const QUANTIFIER_HAS_NOTHING_TO_REPEAT: DiagnosticMessage = diag!(108, Error, "Quantifier has nothing to repeat.");

    // ========================================================================
    // Grammar errors (200-299)
    //
    // User-input-triggered and always recoverable.
    // ========================================================================
    pub const INCOMPLETE_QUANTIFIER: DiagnosticMessage = diag!(201, Error, "Incomplete quantifier.");
    pub const UNTERMINATED_CHARACTER_CLASS: DiagnosticMessage = diag!(202, Error, "Unterminated character class.");
    pub const INVALID_ESCAPE: DiagnosticMessage = diag!(203, Error, "Invalid escape.");
    pub const QUANTIFIER_TARGET_NOT_QUANTIFIABLE: DiagnosticMessage = diag!(204, Error, "Quantifier target is not quantifiable.");
    pub const NUMBERS_OUT_OF_ORDER_IN_QUANTIFIER: DiagnosticMessage = diag!(205, Error, "Numbers out of order in quantifier.");
}
