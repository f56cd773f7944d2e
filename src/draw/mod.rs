//! Drawing production: primitives, text fitting, edge routing, and the
//! paint pass that assembles a finished [`Drawing`].
//!
//! The engine owns no pixels. A drawing is a list of primitive
//! operations (rectangles, polylines, text, circles) the host surface
//! replays in order, plus the positioned nodes and routed edges that
//! produced them, kept for hit testing and adjacency queries.

mod drawing;
mod edges;
mod paint;
mod primitives;
mod text;

pub use drawing::{Drawing, Edge, LabelEntry, NodeShape, PositionedNode};
pub use edges::{arrowhead, route_back, route_forward, BackEdgeRoute};
pub use paint::{paint, paint_function, paint_scalar};
pub use primitives::{Bounds, DrawOp, Layer, Point};
pub use text::{slot_text, to_text, LabelAllocator, MAX_INLINE};
