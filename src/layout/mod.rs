//! Layout: drawing constants, canvas estimation, and node placement.
//!
//! The layout stage is pure: it reads a node graph and produces
//! coordinates, touching no rendering state. Canvas dimensions are
//! estimated up front from tree summaries so the surface can be
//! allocated before any node is placed; placement then assigns every
//! owned node a position in whole `distance_x` steps from its parent
//! and finally shifts the whole drawing right so the leftmost node
//! sits on the margin.

mod config;
mod metrics;
mod place;

pub use config::DrawConfig;
pub use metrics::{canvas_size, tree_height, tree_width};
pub use place::{place, shift_scale, LayoutResult};
