//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Point containment (which box was clicked)
//! - Nearest neighbor with a tolerance
//! - Rectangle intersection
//!
//! Entries are the drawn bounds of pair boxes and function circles,
//! not their centers, so a hit means the cursor is actually inside
//! the node.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::draw::{Bounds, PositionedNode};
use crate::tree::NodeId;

/// A node's drawn bounds in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    /// The node identifier.
    pub id: NodeId,
    /// Top-left corner.
    pub min: [f32; 2],
    /// Bottom-right corner.
    pub max: [f32; 2],
}

impl NodeBox {
    /// Create a new NodeBox from drawn bounds.
    pub fn new(id: NodeId, bounds: Bounds) -> Self {
        Self {
            id,
            min: [bounds.x, bounds.y],
            max: [bounds.right(), bounds.bottom()],
        }
    }
}

impl RTreeObject for NodeBox {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for NodeBox {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        // Squared distance from the point to the box, zero inside.
        let dx = (self.min[0] - point[0]).max(point[0] - self.max[0]).max(0.0);
        let dy = (self.min[1] - point[1]).max(point[1] - self.max[1]).max(0.0);
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        point[0] >= self.min[0]
            && point[0] <= self.max[0]
            && point[1] >= self.min[1]
            && point[1] <= self.max[1]
    }
}

/// Spatial index over the visible drawing's node boxes.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct BoxIndex {
    tree: RTree<NodeBox>,
}

impl BoxIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Insert a node's bounds into the index.
    pub fn insert(&mut self, id: NodeId, bounds: Bounds) {
        self.tree.insert(NodeBox::new(id, bounds));
    }

    /// Find the node whose box contains the point.
    pub fn hit(&self, x: f32, y: f32) -> Option<NodeId> {
        self.tree.locate_at_point(&[x, y]).map(|b| b.id)
    }

    /// Find the nearest node to a point.
    pub fn nearest(&self, x: f32, y: f32) -> Option<NodeId> {
        self.tree.nearest_neighbor(&[x, y]).map(|b| b.id)
    }

    /// Find the nearest node whose box edge is within a maximum
    /// distance. A point inside a box is at distance zero.
    pub fn nearest_within(&self, x: f32, y: f32, max_distance: f32) -> Option<NodeId> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|b| b.distance_2(&[x, y]) <= max_distance_sq)
            .map(|b| b.id)
    }

    /// Find all nodes whose boxes intersect a rectangle, in id order.
    pub fn in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<NodeId> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut ids: Vec<NodeId> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|b| b.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Rebuild the index from a drawing's positioned nodes.
    ///
    /// This is more efficient than incremental inserts for bulk updates.
    pub fn rebuild(&mut self, nodes: &[PositionedNode]) {
        let boxes: Vec<_> = nodes
            .iter()
            .map(|n| NodeBox::new(NodeId::new(n.id), n.bounds()))
            .collect();

        self.tree = RTree::bulk_load(boxes);
    }

    /// Clear all nodes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of boxes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for BoxIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_box(x: f32, y: f32) -> Bounds {
        Bounds::new(x, y, 90.0, 25.0)
    }

    #[test]
    fn test_hit_inside_box() {
        let mut index = BoxIndex::new();
        index.insert(NodeId(0), pair_box(30.0, 30.0));
        index.insert(NodeId(1), pair_box(80.0, 90.0));

        // Center of the first box
        assert_eq!(index.hit(75.0, 42.5), Some(NodeId(0)));

        // Center of the second box
        assert_eq!(index.hit(125.0, 102.5), Some(NodeId(1)));

        // Between the rows
        assert_eq!(index.hit(75.0, 70.0), None);
    }

    #[test]
    fn test_hit_on_edge_counts() {
        let mut index = BoxIndex::new();
        index.insert(NodeId(0), pair_box(30.0, 30.0));

        assert_eq!(index.hit(30.0, 30.0), Some(NodeId(0)));
        assert_eq!(index.hit(120.0, 55.0), Some(NodeId(0)));
    }

    #[test]
    fn test_nearest_picks_closest_box() {
        let mut index = BoxIndex::new();
        index.insert(NodeId(0), pair_box(30.0, 30.0));
        index.insert(NodeId(1), pair_box(80.0, 90.0));

        // Between the rows, closer to the first box
        assert_eq!(index.nearest(75.0, 70.0), Some(NodeId(0)));

        // Far past both boxes, the second is still nearer
        assert_eq!(index.nearest(500.0, 500.0), Some(NodeId(1)));

        assert_eq!(BoxIndex::new().nearest(75.0, 70.0), None);
    }

    #[test]
    fn test_nearest_within() {
        let mut index = BoxIndex::new();
        index.insert(NodeId(0), pair_box(30.0, 30.0));
        index.insert(NodeId(1), pair_box(80.0, 90.0));

        // Inside a box is distance zero
        assert_eq!(index.nearest_within(75.0, 42.5, 0.1), Some(NodeId(0)));

        // 10 below the first box's bottom edge
        assert_eq!(index.nearest_within(75.0, 65.0, 15.0), Some(NodeId(0)));

        // Too far from everything
        assert_eq!(index.nearest_within(500.0, 500.0, 20.0), None);
    }

    #[test]
    fn test_in_rect_intersecting() {
        let mut index = BoxIndex::new();
        index.insert(NodeId(0), pair_box(30.0, 30.0));
        index.insert(NodeId(1), pair_box(80.0, 90.0));
        index.insert(NodeId(2), pair_box(300.0, 30.0));

        // Overlaps the first two boxes, misses the third
        let ids = index.in_rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(ids, vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn test_rebuild() {
        let mut index = BoxIndex::new();
        index.insert(NodeId(9), pair_box(500.0, 500.0));

        let nodes = vec![
            PositionedNode {
                id: 0,
                shape: crate::draw::NodeShape::PairBox,
                x: 30.0,
                y: 30.0,
                width: 90.0,
                height: 25.0,
            },
            PositionedNode {
                id: 1,
                shape: crate::draw::NodeShape::PairBox,
                x: 80.0,
                y: 90.0,
                width: 90.0,
                height: 25.0,
            },
        ];

        index.rebuild(&nodes);
        assert_eq!(index.len(), 2);
        assert_eq!(index.hit(500.0, 500.0), None);
        assert_eq!(index.hit(35.0, 35.0), Some(NodeId(0)));
    }

    #[test]
    fn test_clear() {
        let mut index = BoxIndex::new();
        index.insert(NodeId(0), pair_box(30.0, 30.0));

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.hit(35.0, 35.0), None);
    }
}
