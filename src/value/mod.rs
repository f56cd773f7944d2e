//! Host value boundary.
//!
//! The engine never touches the host runtime's concrete value
//! representation. It works through the `PairSource` capability trait:
//! classification predicates, slot accessors, and an identity key for
//! structural memoization. `EncodedHeap` is the wire form of that
//! interface used at the wasm boundary: the host flattens its pair heap
//! into index-addressed cells, which naturally expresses cycles and
//! shared substructure.

mod encoded;
mod source;

pub use encoded::{EncodedCell, EncodedHeap, EncodedId, EncodedSlot, SlotRef};
pub use source::{PairSource, Scalar};
