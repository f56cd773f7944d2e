//! Value classification and the host capability interface.

use std::hash::Hash;

use crate::error::VisualizeError;

/// A leaf value carried in a pair slot or standing alone at top level.
///
/// Scalars are compared by value, never by identity: two equal scalars
/// in different slots stay independent leaves and are never unified
/// into a shared node.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Numeric value.
    Number(f64),
    /// String value. Rendered quoted, subject to the inline length cap.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// The empty-list sentinel when it appears as a whole value rather
    /// than inside a pair slot.
    Null,
}

/// Capability interface a host runtime implements to expose its values.
///
/// The tree builder is generic over this trait and sees nothing else of
/// the host. `Value` is an opaque copyable handle; `Id` is an identity
/// key that must be stable for the duration of one visualize call and
/// must distinguish distinct live pairs and callables even when they
/// compare equal by value.
pub trait PairSource {
    /// Opaque handle to one host value.
    type Value: Copy;
    /// Identity key for pairs and callables.
    type Id: Copy + Eq + Hash;

    /// Whether the value is a pair.
    fn is_pair(&self, value: Self::Value) -> bool;

    /// Whether the value is the empty-list terminator.
    fn is_null(&self, value: Self::Value) -> bool;

    /// Whether the value is callable.
    fn is_callable(&self, value: Self::Value) -> bool;

    /// Left (head) slot of a pair. Only called when `is_pair` holds.
    fn left(&self, value: Self::Value) -> Result<Self::Value, VisualizeError>;

    /// Right (tail) slot of a pair. Only called when `is_pair` holds.
    fn right(&self, value: Self::Value) -> Result<Self::Value, VisualizeError>;

    /// Identity key of a pair or callable. Only called when `is_pair`
    /// or `is_callable` holds.
    fn identity(&self, value: Self::Value) -> Self::Id;

    /// Scalar payload of a value that is neither a pair nor callable.
    /// A null value yields [`Scalar::Null`].
    fn scalar(&self, value: Self::Value) -> Scalar;
}
