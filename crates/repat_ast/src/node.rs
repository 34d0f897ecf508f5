//! Syntax tree node definitions for the regular expression pattern grammar.
//!
//! The node set is a closed sum type, mirroring the grammar subset the
//! parser understands. The `Element` and `QuantifiableElement` capability
//! tags of the grammar are expressed as predicates over `NodeKind` rather
//! than as separate types, which keeps every match exhaustive.

use crate::arena::NodeId;
use repat_core::text::Loc;

/// One syntax tree node: its variant, source span, and parent handle.
///
/// `parent` is `None` only for the Pattern root. It is set when the node is
/// appended into its parent's list and never changes afterwards, except for
/// an element re-parented under a Quantifier during pop-and-wrap.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub loc: Loc,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, loc: Loc, parent: Option<NodeId>) -> Self {
        Self { kind, loc, parent }
    }
}

/// The node variants of the pattern grammar.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The tree root. Holds one Alternative per `|`-separated branch.
    Pattern { alternatives: Vec<NodeId> },
    /// One branch of a disjunction; an ordered sequence of elements.
    Alternative { elements: Vec<NodeId> },
    /// A single literal character, stored as its code value. In legacy mode
    /// this may be one half of a surrogate pair.
    Character { value: u32 },
    /// The `.` wildcard.
    AnyCharacterSet,
    /// A `[...]` character class. Elements are Characters and
    /// CharacterClassRanges.
    CharacterClass { negate: bool, elements: Vec<NodeId> },
    /// A `min-max` range inside a character class. Both endpoints are
    /// Character nodes.
    CharacterClassRange { min: NodeId, max: NodeId },
    /// A repetition wrapping exactly one quantifiable element.
    /// `max == None` means unbounded.
    Quantifier {
        min: u32,
        max: Option<u32>,
        greedy: bool,
        element: NodeId,
    },
}

impl NodeKind {
    /// Whether this variant can appear in an Alternative's or
    /// CharacterClass's element list.
    pub fn is_element(&self) -> bool {
        matches!(
            self,
            NodeKind::Character { .. }
                | NodeKind::CharacterClass { .. }
                | NodeKind::AnyCharacterSet
                | NodeKind::Quantifier { .. }
                | NodeKind::CharacterClassRange { .. }
        )
    }

    /// Whether a Quantifier may legally wrap this variant.
    pub fn is_quantifiable(&self) -> bool {
        matches!(
            self,
            NodeKind::Character { .. } | NodeKind::CharacterClass { .. } | NodeKind::AnyCharacterSet
        )
    }

    /// The element list of an Alternative or CharacterClass, if this
    /// variant has one.
    pub fn elements_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            NodeKind::Alternative { elements } | NodeKind::CharacterClass { elements, .. } => {
                Some(elements)
            }
            _ => None,
        }
    }

    /// The variant name, as it appears in serialized trees.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Pattern { .. } => "Pattern",
            NodeKind::Alternative { .. } => "Alternative",
            NodeKind::Character { .. } => "Character",
            NodeKind::AnyCharacterSet => "AnyCharacterSet",
            NodeKind::CharacterClass { .. } => "CharacterClass",
            NodeKind::CharacterClassRange { .. } => "CharacterClassRange",
            NodeKind::Quantifier { .. } => "Quantifier",
        }
    }
}
