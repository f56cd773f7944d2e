//! Finalized drawing data.
//!
//! A [`Drawing`] is immutable once produced. The engine keeps every
//! completed drawing so the UI can step backward and forward through
//! history; navigation never re-runs layout. All types here serialize
//! into plain JS objects at the wasm boundary.

use serde::Serialize;

use crate::draw::primitives::{Bounds, DrawOp, Point};

/// How a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeShape {
    /// Two-slot rectangle.
    PairBox,
    /// Function circle.
    FunctionCircle,
}

/// A node with its final coordinates. `x`/`y` is the top-left corner
/// of the drawn bounds and never changes once assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: u32,
    pub shape: NodeShape,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PositionedNode {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// A drawn connector between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from_id: u32,
    pub to_id: u32,
    /// True for edges to an already-positioned target (cycles and
    /// shared references), which render behind the nodes.
    pub is_back_edge: bool,
    /// Anchor in the source slot.
    pub from_pos: Point,
    /// Point where the edge meets the target.
    pub to_pos: Point,
    /// Full routed path, endpoints included.
    pub points: Vec<Point>,
}

/// One entry of the label table: the full text behind a `*N` marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelEntry {
    pub number: u32,
    pub text: String,
}

/// The finished output of one visualize call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    /// Positioned nodes in id order.
    pub nodes: Vec<PositionedNode>,
    /// Routed edges in traversal order.
    pub edges: Vec<Edge>,
    /// Primitive ops, pre-sorted in paint order.
    pub ops: Vec<DrawOp>,
    /// Labels assigned to oversized slot values, numbered from 1.
    pub labels: Vec<LabelEntry>,
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
}

impl Drawing {
    /// Positioned node by id, if the id belongs to this drawing.
    pub fn node(&self, id: u32) -> Option<&PositionedNode> {
        self.nodes.get(id as usize)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
