//! Error type for the visualize pipeline.
//!
//! A visualize call either fully succeeds or raises one terminal error;
//! there is no partial-drawing recovery. Values too large to render
//! inline are not errors: they go through the `*N` label table instead
//! (see `draw::text`).

use thiserror::Error;

/// Terminal failures of one build + layout + paint call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualizeError {
    /// The input structure carried a tag the engine does not
    /// recognize. Decoding stops at the first unknown shape; nothing
    /// is skipped.
    #[error("unrecognized value shape: {0}")]
    UnrecognizedShape(String),

    /// A pair slot referenced a cell index outside the encoded heap.
    #[error("pair slot references cell {cell}, but the heap has {cells} cells")]
    DanglingCell { cell: u32, cells: u32 },

    /// The encoded structure has no root value to draw.
    #[error("structure has no drawable content")]
    MissingContent,
}
