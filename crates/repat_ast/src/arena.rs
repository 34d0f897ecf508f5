//! Id-arena for syntax tree nodes.
//!
//! All nodes of a parse are owned by one `PatternArena`; relationships
//! between nodes (children and parent back-references) are `NodeId` indices
//! into it. The parent relation is a lookup, never a second ownership path,
//! so the parent-linked tree needs no reference cycles.

use crate::node::Node;
use std::ops::{Index, IndexMut};

/// A handle to a node in a [`PatternArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns every node created during one parse.
#[derive(Debug, Default)]
pub struct PatternArena {
    nodes: Vec<Node>,
}

impl PatternArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a node, returning its handle.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }
}

impl Index<NodeId> for PatternArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

impl IndexMut<NodeId> for PatternArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use repat_core::text::Loc;

    #[test]
    fn test_alloc_and_lookup() {
        let mut arena = PatternArena::new();
        let root = arena.alloc(Node::new(
            NodeKind::Pattern {
                alternatives: Vec::new(),
            },
            Loc::open(0),
            None,
        ));
        let child = arena.alloc(Node::new(
            NodeKind::Character { value: 0x61 },
            Loc::new(0, 1),
            Some(root),
        ));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[child].parent, Some(root));
        assert!(arena[root].parent.is_none());
    }
}
