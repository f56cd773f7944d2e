//! Node arena types.

use std::fmt;

use crate::value::Scalar;

/// Id of a pair or function node within one drawing.
///
/// Ids are assigned from 0 in depth-first visitation order and double
/// as arena indices, so resolving a back-reference is a plain index
/// lookup. They are only meaningful within the drawing that issued
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId
    #[inline]
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Get the raw u32 value
    #[inline]
    pub fn raw(&self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Contents of one slot (left or right) of a pair node.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Owned child: a pair or function visited for the first time
    /// through this slot. Drawn as a subtree under the parent.
    Node(NodeId),
    /// Reference to a node that already has an id. Drawn as a back
    /// edge, never as a new subtree.
    Back(NodeId),
    /// Inline scalar leaf. Never id-assigned: equal scalars in
    /// different slots stay independent.
    Data(Scalar),
    /// Empty-list terminator, drawn as a slash through the slot.
    Null,
}

/// Payload of an id-assigned node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Two-slot box.
    Pair { left: Slot, right: Slot },
    /// Callable, drawn as a circle. Carries no children.
    Function,
}

/// An id-assigned node in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

/// The finite node arena built from one host value.
///
/// Nodes are stored in id order: `nodes[i].id == NodeId(i)`, and the
/// root is always id 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        NodeGraph { nodes }
    }

    /// Id of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node by id. Ids are issued by the builder of this
    /// graph, so every held id resolves.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Number of id-assigned nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}
