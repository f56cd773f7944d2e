//! Recursive node placement.
//!
//! # Algorithm Overview
//!
//! Placement walks the arena from the root, assigning each owned node
//! a position relative to its parent: children sit one level down
//! (`distance_y`) and a whole number of `distance_x` steps to the
//! side. The step count grows with the child's inner subtree (the
//! right subtree of a left child, the left subtree of a right child),
//! which is exactly the part that extends back toward the parent, so
//! sibling subtrees never overlap. Back-references and scalar slots
//! place nothing.
//!
//! Coordinates are the top-left anchor of each node's drawn bounds.
//! The walk can produce negative x for deep left subtrees; a final
//! normalization pass shifts every x so the leftmost node sits on the
//! margin. Placement is wholly deterministic: the same graph and
//! config always produce identical coordinates.

use crate::draw::Point;
use crate::layout::config::DrawConfig;
use crate::tree::{NodeGraph, NodeId, NodeKind, Slot};

/// Final coordinates for every id-assigned node, indexed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    positions: Vec<Point>,
}

impl LayoutResult {
    /// Position of a node. Ids come from the graph this layout was
    /// computed for.
    #[inline]
    pub fn get(&self, id: NodeId) -> Point {
        self.positions[id.index()]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate positions in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| (NodeId::new(i as u32), *p))
    }

    /// Smallest x across all placed nodes.
    pub fn min_x(&self) -> f32 {
        self.positions.iter().fold(f32::INFINITY, |m, p| m.min(p.x))
    }

    /// Shift all x coordinates so the leftmost node sits at `margin`.
    /// Y coordinates are already anchored at the top and stay put.
    pub fn normalize_x(&mut self, margin: f32) {
        if self.positions.is_empty() {
            return;
        }
        let delta = margin - self.min_x();
        for p in &mut self.positions {
            p.x += delta;
        }
    }
}

/// Size of the subtree owned through `id`, counted in id-assigned
/// nodes. This is the unit the placer multiplies `distance_x` by when
/// pushing a child sideways: a bigger inner subtree needs more room
/// between the child and its parent.
pub fn shift_scale(graph: &NodeGraph, id: NodeId) -> u32 {
    match &graph.get(id).kind {
        NodeKind::Function => 0,
        NodeKind::Pair { left, right } => {
            slot_scale(graph, left) + slot_scale(graph, right)
        }
    }
}

fn slot_scale(graph: &NodeGraph, slot: &Slot) -> u32 {
    match slot {
        Slot::Node(child) => 1 + shift_scale(graph, *child),
        _ => 0,
    }
}

/// Place every owned node, putting the root's top-left anchor at
/// (`root_x`, `root_y`).
pub fn place(
    graph: &NodeGraph,
    config: &DrawConfig,
    root_x: f32,
    root_y: f32,
) -> LayoutResult {
    let mut positions = vec![Point::new(0.0, 0.0); graph.len()];
    place_node(graph, config, graph.root(), root_x, root_y, &mut positions);
    LayoutResult { positions }
}

fn place_node(
    graph: &NodeGraph,
    config: &DrawConfig,
    id: NodeId,
    x: f32,
    y: f32,
    positions: &mut [Point],
) {
    positions[id.index()] = Point::new(x, y);
    let NodeKind::Pair { left, right } = &graph.get(id).kind else {
        return;
    };

    if let Slot::Node(child) = left {
        // The child's right subtree grows back under the parent, so
        // the shift widens with it.
        let shift = match &graph.get(*child).kind {
            NodeKind::Pair {
                right: Slot::Node(inner),
                ..
            } => 1 + shift_scale(graph, *inner),
            _ => 0,
        };
        place_node(
            graph,
            config,
            *child,
            x - config.distance_x * (1.0 + shift as f32),
            y + config.distance_y,
            positions,
        );
    }

    if let Slot::Node(child) = right {
        let shift = match &graph.get(*child).kind {
            NodeKind::Pair {
                left: Slot::Node(inner),
                ..
            } => 1 + shift_scale(graph, *inner),
            _ => 0,
        };
        place_node(
            graph,
            config,
            *child,
            x + config.distance_x * (1.0 + shift as f32),
            y + config.distance_y,
            positions,
        );
    }
}
