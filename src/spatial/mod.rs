//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree over drawn node boxes for efficient
//! point containment, nearest-neighbor and range queries on the
//! visible drawing.

mod boxtree;

pub use boxtree::{BoxIndex, NodeBox};
