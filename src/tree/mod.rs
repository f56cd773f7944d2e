//! Tree construction from host values.
//!
//! The builder walks a host structure through the [`PairSource`]
//! interface and produces a finite arena of nodes. Every pair and
//! callable is assigned an id on first visit; any later slot holding
//! the same value becomes a back-reference instead of a recursion, so
//! cyclic and shared structures always build a finite tree.
//!
//! [`PairSource`]: crate::value::PairSource

mod builder;
mod node;

pub use builder::TreeBuilder;
pub use node::{Node, NodeGraph, NodeId, NodeKind, Slot};
