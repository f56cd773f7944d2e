//! Cycle-aware tree construction.
//!
//! # Algorithm Overview
//!
//! Depth-first traversal with identity-based memoization. Every pair
//! and callable gets an id the moment it is first reached; the id is
//! recorded in a visited table keyed by host identity before the
//! node's slots are descended into. A slot whose value is already in
//! the table becomes a back-reference instead of a recursive visit, so
//! a self-referential pair, a shared sublist, or any tangle of mutual
//! references builds a finite arena in one pass. The walk does O(1)
//! table work per slot and visits each distinct pair and callable
//! exactly once.
//!
//! Scalars never enter the table: two equal numbers in different slots
//! stay two independent leaves.

use std::collections::HashMap;

use crate::error::VisualizeError;
use crate::tree::node::{Node, NodeGraph, NodeId, NodeKind, Slot};
use crate::value::PairSource;

/// Per-call build state: the arena under construction and the identity
/// table. A fresh builder is created for every visualize call, so ids
/// always restart at 0 and the table never sees values from an earlier
/// drawing.
pub struct TreeBuilder<'a, S: PairSource> {
    source: &'a S,
    nodes: Vec<Node>,
    visited: HashMap<S::Id, NodeId>,
}

impl<'a, S: PairSource> TreeBuilder<'a, S> {
    /// Build the node graph for a pair value. The root pair always
    /// receives id 0.
    ///
    /// Callers branch on the top-level class first: bare scalars and
    /// callables get trivial one-shot drawings without a tree walk, so
    /// this is only reached for pairs.
    pub fn build(source: &'a S, root: S::Value) -> Result<NodeGraph, VisualizeError> {
        let mut builder = TreeBuilder {
            source,
            nodes: Vec::new(),
            visited: HashMap::new(),
        };
        builder.visit_pair(root)?;
        Ok(NodeGraph::from_nodes(builder.nodes))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node { id, kind });
        id
    }

    fn visit_pair(&mut self, value: S::Value) -> Result<NodeId, VisualizeError> {
        // Record the pair before descending so a slot that loops back
        // to it (or to any ancestor) resolves to an id instead of
        // recursing forever.
        let id = self.alloc(NodeKind::Pair {
            left: Slot::Null,
            right: Slot::Null,
        });
        self.visited.insert(self.source.identity(value), id);

        let left = self.visit_slot(self.source.left(value)?)?;
        let right = self.visit_slot(self.source.right(value)?)?;
        self.nodes[id.index()].kind = NodeKind::Pair { left, right };
        Ok(id)
    }

    fn visit_slot(&mut self, value: S::Value) -> Result<Slot, VisualizeError> {
        if self.source.is_null(value) {
            return Ok(Slot::Null);
        }
        if self.source.is_pair(value) {
            if let Some(&id) = self.visited.get(&self.source.identity(value)) {
                return Ok(Slot::Back(id));
            }
            return Ok(Slot::Node(self.visit_pair(value)?));
        }
        if self.source.is_callable(value) {
            let key = self.source.identity(value);
            if let Some(&id) = self.visited.get(&key) {
                return Ok(Slot::Back(id));
            }
            let id = self.alloc(NodeKind::Function);
            self.visited.insert(key, id);
            return Ok(Slot::Node(id));
        }
        Ok(Slot::Data(self.source.scalar(value)))
    }
}
