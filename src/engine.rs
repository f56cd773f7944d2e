//! Core visualizer engine.
//!
//! The engine runs the full pipeline for one call: classify the root,
//! build the node arena, estimate the canvas, place, normalize, paint.
//! A call runs to completion with nothing suspended in between, and
//! every call starts from fresh id and label counters, so drawings
//! never leak state into each other.
//!
//! Completed drawings are retained in order so the UI can step back
//! and forth through history. Switching the visible drawing only moves
//! an index and refreshes the derived query structures: a petgraph
//! StableGraph for adjacency, an R-tree over node boxes for hit
//! testing, and an interleaved position buffer for bulk export. The
//! drawings themselves are never touched again.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

use crate::draw::{paint, paint_function, paint_scalar, Drawing};
use crate::error::VisualizeError;
use crate::layout::{place, DrawConfig};
use crate::spatial::BoxIndex;
use crate::tree::{NodeId, TreeBuilder};
use crate::value::PairSource;

/// Kind of a drawn connector, stored as the edge weight in the
/// topology graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Forward,
    Back,
}

/// The visualizer: pipeline orchestration, drawing history, and query
/// indices over the visible drawing.
pub struct VisualizerEngine {
    /// Geometry constants applied to future drawings.
    config: DrawConfig,

    /// Every completed drawing, oldest first.
    drawings: Vec<Drawing>,

    /// Index of the visible drawing, if any.
    current: Option<usize>,

    /// Topology of the visible drawing.
    topology: StableGraph<NodeId, EdgeKind, Directed>,

    /// Map from drawing node id to petgraph NodeIndex.
    node_id_to_index: HashMap<NodeId, NodeIndex>,

    /// Box index of the visible drawing for hit testing.
    spatial: BoxIndex,

    /// Interleaved [x0, y0, x1, y1, ...] top-left anchors of the
    /// visible drawing's nodes, in id order.
    positions: Vec<f32>,
}

impl VisualizerEngine {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create an engine with default geometry.
    pub fn new() -> Self {
        Self::with_config(DrawConfig::default())
    }

    /// Create an engine with explicit geometry.
    pub fn with_config(config: DrawConfig) -> Self {
        Self {
            config,
            drawings: Vec::new(),
            current: None,
            topology: StableGraph::new(),
            node_id_to_index: HashMap::new(),
            spatial: BoxIndex::new(),
            positions: Vec::new(),
        }
    }

    /// Current geometry constants.
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Replace the geometry constants. Existing drawings keep the
    /// coordinates they were produced with; only future visualize
    /// calls see the change.
    pub fn set_config(&mut self, config: DrawConfig) {
        self.config = config;
    }

    // =========================================================================
    // Visualization
    // =========================================================================

    /// Run the full pipeline for one value and make the result the
    /// visible drawing.
    ///
    /// A pair root gets the tree treatment; a bare callable becomes a
    /// single circle and anything else a single line of text. On error
    /// the history and the visible drawing are left untouched.
    pub fn visualize<S: PairSource>(
        &mut self,
        source: &S,
        root: S::Value,
    ) -> Result<&Drawing, VisualizeError> {
        let drawing = if source.is_pair(root) {
            let graph = TreeBuilder::build(source, root)?;
            let mut layout = place(&graph, &self.config, 0.0, self.config.margin);
            layout.normalize_x(self.config.margin);
            paint(&graph, &layout, &self.config)
        } else if source.is_callable(root) {
            paint_function(&self.config)
        } else {
            paint_scalar(&source.scalar(root), &self.config)
        };

        self.drawings.push(drawing);
        let index = self.drawings.len() - 1;
        self.show_drawing(index);
        Ok(&self.drawings[index])
    }

    /// Drop all drawings and derived state.
    pub fn clear(&mut self) {
        self.drawings.clear();
        self.current = None;
        self.topology.clear();
        self.node_id_to_index.clear();
        self.spatial.clear();
        self.positions.clear();
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Number of retained drawings.
    pub fn drawing_count(&self) -> u32 {
        self.drawings.len() as u32
    }

    /// Index of the visible drawing.
    pub fn current_index(&self) -> Option<u32> {
        self.current.map(|i| i as u32)
    }

    /// The visible drawing.
    pub fn current_drawing(&self) -> Option<&Drawing> {
        self.current.and_then(|i| self.drawings.get(i))
    }

    /// Make the drawing at `index` visible and rebuild the query
    /// indices for it. Returns false if the index is out of range.
    pub fn show_drawing(&mut self, index: usize) -> bool {
        if index >= self.drawings.len() {
            return false;
        }
        self.current = Some(index);
        self.rebuild_indices();
        true
    }

    /// Step forward in history.
    pub fn show_next(&mut self) -> bool {
        match self.current {
            Some(i) => self.show_drawing(i + 1),
            None => false,
        }
    }

    /// Step backward in history.
    pub fn show_previous(&mut self) -> bool {
        match self.current {
            Some(i) if i > 0 => self.show_drawing(i - 1),
            _ => false,
        }
    }

    // =========================================================================
    // Queries (visible drawing)
    // =========================================================================

    /// Number of nodes in the visible drawing.
    pub fn node_count(&self) -> u32 {
        self.current_drawing()
            .map(|d| d.node_count() as u32)
            .unwrap_or(0)
    }

    /// Number of edges in the visible drawing.
    pub fn edge_count(&self) -> u32 {
        self.current_drawing()
            .map(|d| d.edge_count() as u32)
            .unwrap_or(0)
    }

    /// Ids this node's slots point at, forward and back edges alike.
    pub fn neighbors(&self, id: u32) -> Vec<u32> {
        self.node_id_to_index
            .get(&NodeId::new(id))
            .map(|&index| {
                self.topology
                    .neighbors(index)
                    .filter_map(|n| self.topology.node_weight(n).map(|id| id.raw()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Node whose drawn box contains the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<u32> {
        self.spatial.hit(x, y).map(|id| id.raw())
    }

    /// Nearest node to the point, at any distance.
    pub fn find_nearest_node(&self, x: f32, y: f32) -> Option<u32> {
        self.spatial.nearest(x, y).map(|id| id.raw())
    }

    /// Nearest node within a tolerance of the point.
    pub fn find_nearest_node_within(&self, x: f32, y: f32, max_distance: f32) -> Option<u32> {
        self.spatial
            .nearest_within(x, y, max_distance)
            .map(|id| id.raw())
    }

    /// All nodes whose boxes intersect a rectangle, in id order.
    pub fn nodes_in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<u32> {
        self.spatial
            .in_rect(min_x, min_y, max_x, max_y)
            .into_iter()
            .map(|id| id.raw())
            .collect()
    }

    /// Interleaved top-left anchors of the visible drawing's nodes.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn rebuild_indices(&mut self) {
        self.topology.clear();
        self.node_id_to_index.clear();
        self.spatial.clear();
        self.positions.clear();

        let Some(index) = self.current else { return };
        let drawing = &self.drawings[index];

        for node in &drawing.nodes {
            let id = NodeId::new(node.id);
            let graph_index = self.topology.add_node(id);
            self.node_id_to_index.insert(id, graph_index);
            self.positions.push(node.x);
            self.positions.push(node.y);
        }
        for edge in &drawing.edges {
            let from = self.node_id_to_index.get(&NodeId::new(edge.from_id));
            let to = self.node_id_to_index.get(&NodeId::new(edge.to_id));
            if let (Some(&from), Some(&to)) = (from, to) {
                let kind = if edge.is_back_edge {
                    EdgeKind::Back
                } else {
                    EdgeKind::Forward
                };
                self.topology.add_edge(from, to, kind);
            }
        }
        self.spatial.rebuild(&drawing.nodes);
    }
}

impl Default for VisualizerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{EncodedCell, EncodedHeap, EncodedSlot};

    fn two_pair_heap() -> EncodedHeap {
        // pair(1, pair(2, null))
        EncodedHeap::new(
            vec![
                EncodedCell::new(EncodedSlot::number(1.0), EncodedSlot::pair(1)),
                EncodedCell::new(EncodedSlot::number(2.0), EncodedSlot::Null),
            ],
            EncodedSlot::pair(0),
        )
    }

    fn single_pair_heap() -> EncodedHeap {
        EncodedHeap::new(
            vec![EncodedCell::new(
                EncodedSlot::number(7.0),
                EncodedSlot::Null,
            )],
            EncodedSlot::pair(0),
        )
    }

    fn visualize(engine: &mut VisualizerEngine, heap: &EncodedHeap) {
        let root = heap.root_value().unwrap();
        engine.visualize(heap, root).unwrap();
    }

    #[test]
    fn test_visualize_pair_tree() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());

        assert_eq!(engine.drawing_count(), 1);
        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(engine.node_count(), 2);
        assert_eq!(engine.edge_count(), 1);
    }

    #[test]
    fn test_history_navigation() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());
        visualize(&mut engine, &single_pair_heap());

        assert_eq!(engine.drawing_count(), 2);
        assert_eq!(engine.current_index(), Some(1));
        assert_eq!(engine.node_count(), 1);

        assert!(engine.show_previous());
        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(engine.node_count(), 2);

        assert!(engine.show_next());
        assert_eq!(engine.current_index(), Some(1));
        assert!(!engine.show_next());
        assert_eq!(engine.current_index(), Some(1));
    }

    #[test]
    fn test_show_drawing_out_of_range() {
        let mut engine = VisualizerEngine::new();
        assert!(!engine.show_drawing(0));
        visualize(&mut engine, &single_pair_heap());
        assert!(!engine.show_drawing(5));
        assert_eq!(engine.current_index(), Some(0));
    }

    #[test]
    fn test_hit_test_visible_drawing() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());

        // Root box spans (30, 30) to (120, 55).
        assert_eq!(engine.hit_test(75.0, 42.5), Some(0));
        assert_eq!(engine.hit_test(125.0, 102.5), Some(1));
        assert_eq!(engine.hit_test(0.0, 0.0), None);
    }

    #[test]
    fn test_find_nearest_node() {
        let mut engine = VisualizerEngine::new();
        assert_eq!(engine.find_nearest_node(75.0, 70.0), None);
        visualize(&mut engine, &two_pair_heap());

        // Between the rows: nothing is hit, but the root box is
        // closest.
        assert_eq!(engine.hit_test(75.0, 70.0), None);
        assert_eq!(engine.find_nearest_node(75.0, 70.0), Some(0));
        assert_eq!(engine.find_nearest_node(165.0, 110.0), Some(1));
    }

    #[test]
    fn test_neighbors_follow_slots() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());

        assert_eq!(engine.neighbors(0), vec![1]);
        assert!(engine.neighbors(1).is_empty());
        assert!(engine.neighbors(42).is_empty());
    }

    #[test]
    fn test_back_edge_in_topology() {
        let mut engine = VisualizerEngine::new();
        let heap = EncodedHeap::new(
            vec![EncodedCell::new(EncodedSlot::pair(0), EncodedSlot::Null)],
            EncodedSlot::pair(0),
        );
        visualize(&mut engine, &heap);

        assert_eq!(engine.node_count(), 1);
        assert_eq!(engine.edge_count(), 1);
        assert_eq!(engine.neighbors(0), vec![0]);
    }

    #[test]
    fn test_positions_interleaved() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());

        let positions = engine.positions();
        assert_eq!(positions.len(), 4);
        assert_eq!(&positions[0..2], &[30.0, 30.0]);
        assert_eq!(&positions[2..4], &[80.0, 90.0]);
    }

    #[test]
    fn test_error_leaves_history_untouched() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &single_pair_heap());

        let bad = EncodedHeap::new(
            vec![EncodedCell::new(EncodedSlot::pair(9), EncodedSlot::Null)],
            EncodedSlot::pair(0),
        );
        let root = bad.root_value().unwrap();
        assert!(engine.visualize(&bad, root).is_err());

        assert_eq!(engine.drawing_count(), 1);
        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(engine.node_count(), 1);
    }

    #[test]
    fn test_scalar_root_draws_text_only() {
        let mut engine = VisualizerEngine::new();
        let heap = EncodedHeap::new(Vec::new(), EncodedSlot::number(42.0));
        visualize(&mut engine, &heap);

        assert_eq!(engine.drawing_count(), 1);
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.hit_test(50.0, 40.0), None);
    }

    #[test]
    fn test_callable_root_draws_circle() {
        let mut engine = VisualizerEngine::new();
        let heap = EncodedHeap::new(Vec::new(), EncodedSlot::callable(3));
        visualize(&mut engine, &heap);

        assert_eq!(engine.node_count(), 1);
        // Circle bounds start at the margin.
        assert_eq!(engine.hit_test(40.0, 40.0), Some(0));
    }

    #[test]
    fn test_null_root_draws_text() {
        let mut engine = VisualizerEngine::new();
        let heap = EncodedHeap::new(Vec::new(), EncodedSlot::Null);
        visualize(&mut engine, &heap);

        let drawing = engine.current_drawing().unwrap();
        assert_eq!(drawing.node_count(), 0);
        assert_eq!(drawing.ops.len(), 1);
    }

    #[test]
    fn test_set_config_affects_future_drawings_only() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());
        let before = engine.current_drawing().unwrap().nodes[1].y;

        let mut config = engine.config().clone();
        config.distance_y = 100.0;
        engine.set_config(config);

        visualize(&mut engine, &two_pair_heap());
        let after = engine.current_drawing().unwrap().nodes[1].y;
        assert_eq!(before, 90.0);
        assert_eq!(after, 130.0);

        // The old drawing keeps its coordinates.
        engine.show_previous();
        assert_eq!(engine.current_drawing().unwrap().nodes[1].y, 90.0);
    }

    #[test]
    fn test_clear() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());
        engine.clear();

        assert_eq!(engine.drawing_count(), 0);
        assert_eq!(engine.current_index(), None);
        assert_eq!(engine.node_count(), 0);
        assert!(engine.positions().is_empty());
        assert_eq!(engine.hit_test(75.0, 42.5), None);
    }

    #[test]
    fn test_nodes_in_rect() {
        let mut engine = VisualizerEngine::new();
        visualize(&mut engine, &two_pair_heap());

        assert_eq!(engine.nodes_in_rect(0.0, 0.0, 200.0, 200.0), vec![0, 1]);
        assert_eq!(engine.nodes_in_rect(0.0, 0.0, 100.0, 60.0), vec![0]);
    }
}
