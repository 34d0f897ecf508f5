//! repat_ast: Syntax tree for ECMAScript regular expression patterns.
//!
//! Nodes live in a single id-arena per parse. Children are owned through
//! `NodeId` handles stored in their parent's variant; the parent
//! back-reference on every node is a handle too, used only for upward
//! navigation while the tree is being built.

pub mod arena;
pub mod node;

pub use arena::{NodeId, PatternArena};
pub use node::{Node, NodeKind};
