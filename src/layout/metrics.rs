//! Canvas size estimation.
//!
//! `tree_height` and `tree_width` are pure summaries of a node graph,
//! computed before any node is placed so the render surface can be
//! allocated once up front. Both walk owned slots only: scalar leaves,
//! nulls and back-references contribute nothing, and a shared subtree
//! is owned by exactly one slot in the arena, so it is counted exactly
//! once no matter how many back-references point at it.

use crate::layout::config::DrawConfig;
use crate::tree::{NodeGraph, NodeId, NodeKind, Slot};

/// Height of the tree in levels below which nothing hangs: a pair with
/// only leaf slots has height 1, and each level of owned pairs adds 1.
pub fn tree_height(graph: &NodeGraph) -> u32 {
    height_of(graph, graph.root())
}

/// Width of the tree counted in pair nodes.
pub fn tree_width(graph: &NodeGraph) -> u32 {
    width_of(graph, graph.root())
}

/// Estimated canvas dimensions for a placed pair tree.
///
/// Function circles widen a row without widening the pair count, so
/// the paint pass grows the canvas to the placed extent when that
/// comes out larger.
pub fn canvas_size(graph: &NodeGraph, config: &DrawConfig) -> (f32, f32) {
    let width = 2.0 * config.margin
        + config.pair_width()
        + tree_width(graph) as f32 * config.distance_x;
    let height = 2.0 * config.margin
        + config.box_height
        + tree_height(graph).saturating_sub(1) as f32 * config.distance_y;
    (width, height)
}

fn height_of(graph: &NodeGraph, id: NodeId) -> u32 {
    match &graph.get(id).kind {
        NodeKind::Function => 0,
        NodeKind::Pair { left, right } => {
            1 + slot_height(graph, left).max(slot_height(graph, right))
        }
    }
}

fn slot_height(graph: &NodeGraph, slot: &Slot) -> u32 {
    match slot {
        Slot::Node(child) => height_of(graph, *child),
        _ => 0,
    }
}

fn width_of(graph: &NodeGraph, id: NodeId) -> u32 {
    match &graph.get(id).kind {
        NodeKind::Function => 0,
        NodeKind::Pair { left, right } => {
            slot_width(graph, left) + slot_width(graph, right) + 1
        }
    }
}

fn slot_width(graph: &NodeGraph, slot: &Slot) -> u32 {
    match slot {
        Slot::Node(child) => width_of(graph, *child),
        _ => 0,
    }
}
