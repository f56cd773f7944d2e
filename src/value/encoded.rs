//! Wire encoding of a pair heap.
//!
//! The JS host flattens the structure to visualize into a cell table:
//! every live pair becomes one `EncodedCell`, and slots refer to pairs
//! by cell index. Cycles and shared substructure fall out of the index
//! representation for free, since the same cell can be referenced from
//! any number of slots. Callables are carried as host-assigned ids, so
//! two slots holding the same function reference encode the same id.
//!
//! `EncodedHeap` implements [`PairSource`] directly: a value handle is
//! the slot position holding it, which keeps handles `Copy` without
//! duplicating string payloads.

use serde::{Deserialize, Serialize};

use crate::error::VisualizeError;
use crate::value::source::{PairSource, Scalar};

/// One slot payload in the encoded heap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EncodedSlot {
    /// Reference to a pair cell by index into [`EncodedHeap::cells`].
    Pair { cell: u32 },
    /// Empty-list terminator.
    Null,
    /// Callable, identified by a host-assigned id.
    Callable { id: u32 },
    /// Numeric leaf.
    Number { value: f64 },
    /// String leaf.
    String { value: String },
    /// Boolean leaf.
    Boolean { value: bool },
}

impl EncodedSlot {
    pub fn pair(cell: u32) -> Self {
        EncodedSlot::Pair { cell }
    }

    pub fn callable(id: u32) -> Self {
        EncodedSlot::Callable { id }
    }

    pub fn number(value: f64) -> Self {
        EncodedSlot::Number { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        EncodedSlot::String {
            value: value.into(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        EncodedSlot::Boolean { value }
    }
}

/// One pair cell: a left and a right slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedCell {
    pub left: EncodedSlot,
    pub right: EncodedSlot,
}

impl EncodedCell {
    pub fn new(left: EncodedSlot, right: EncodedSlot) -> Self {
        EncodedCell { left, right }
    }
}

/// A flattened pair heap plus the root value to visualize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodedHeap {
    /// Pair cells, addressed by index from [`EncodedSlot::Pair`].
    pub cells: Vec<EncodedCell>,
    /// The value to visualize. `None` means the host sent nothing
    /// drawable.
    pub root: Option<EncodedSlot>,
}

impl EncodedHeap {
    pub fn new(cells: Vec<EncodedCell>, root: EncodedSlot) -> Self {
        EncodedHeap {
            cells,
            root: Some(root),
        }
    }

    /// Handle to the root value, or [`VisualizeError::MissingContent`]
    /// when the heap carries none.
    pub fn root_value(&self) -> Result<SlotRef, VisualizeError> {
        match self.root {
            Some(_) => Ok(SlotRef::Root),
            None => Err(VisualizeError::MissingContent),
        }
    }

    fn slot(&self, value: SlotRef) -> Option<&EncodedSlot> {
        match value {
            SlotRef::Root => self.root.as_ref(),
            SlotRef::Left(cell) => self.cells.get(cell as usize).map(|c| &c.left),
            SlotRef::Right(cell) => self.cells.get(cell as usize).map(|c| &c.right),
        }
    }

    /// Resolve a pair slot to its cell index, verifying the reference.
    fn cell_of(&self, value: SlotRef) -> Result<u32, VisualizeError> {
        match self.slot(value) {
            Some(&EncodedSlot::Pair { cell }) => {
                if (cell as usize) < self.cells.len() {
                    Ok(cell)
                } else {
                    Err(VisualizeError::DanglingCell {
                        cell,
                        cells: self.cells.len() as u32,
                    })
                }
            }
            _ => Err(VisualizeError::UnrecognizedShape(
                "expected a pair".to_string(),
            )),
        }
    }
}

/// Handle to one value inside an [`EncodedHeap`]: the slot position
/// holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRef {
    /// The heap's root value.
    Root,
    /// Left slot of the cell at this index.
    Left(u32),
    /// Right slot of the cell at this index.
    Right(u32),
}

/// Identity key for encoded pairs and callables.
///
/// Cell indices and callable ids live in separate spaces, so a pair in
/// cell 3 never collides with the callable the host numbered 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodedId {
    Cell(u32),
    Callable(u32),
}

impl PairSource for EncodedHeap {
    type Value = SlotRef;
    type Id = EncodedId;

    fn is_pair(&self, value: SlotRef) -> bool {
        matches!(self.slot(value), Some(EncodedSlot::Pair { .. }))
    }

    fn is_null(&self, value: SlotRef) -> bool {
        matches!(self.slot(value), Some(EncodedSlot::Null))
    }

    fn is_callable(&self, value: SlotRef) -> bool {
        matches!(self.slot(value), Some(EncodedSlot::Callable { .. }))
    }

    fn left(&self, value: SlotRef) -> Result<SlotRef, VisualizeError> {
        Ok(SlotRef::Left(self.cell_of(value)?))
    }

    fn right(&self, value: SlotRef) -> Result<SlotRef, VisualizeError> {
        Ok(SlotRef::Right(self.cell_of(value)?))
    }

    fn identity(&self, value: SlotRef) -> EncodedId {
        match self.slot(value) {
            Some(&EncodedSlot::Pair { cell }) => EncodedId::Cell(cell),
            Some(&EncodedSlot::Callable { id }) => EncodedId::Callable(id),
            // Contract: only called for pairs and callables.
            _ => EncodedId::Cell(u32::MAX),
        }
    }

    fn scalar(&self, value: SlotRef) -> Scalar {
        match self.slot(value) {
            Some(EncodedSlot::Number { value }) => Scalar::Number(*value),
            Some(EncodedSlot::String { value }) => Scalar::Str(value.clone()),
            Some(EncodedSlot::Boolean { value }) => Scalar::Bool(*value),
            _ => Scalar::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let heap = EncodedHeap::new(
            vec![EncodedCell::new(
                EncodedSlot::number(1.0),
                EncodedSlot::Null,
            )],
            EncodedSlot::pair(0),
        );

        let root = heap.root_value().unwrap();
        assert!(heap.is_pair(root));
        assert!(!heap.is_null(root));
        assert!(!heap.is_callable(root));

        let left = heap.left(root).unwrap();
        let right = heap.right(root).unwrap();
        assert!(!heap.is_pair(left));
        assert_eq!(heap.scalar(left), Scalar::Number(1.0));
        assert!(heap.is_null(right));
    }

    #[test]
    fn test_missing_root() {
        let heap = EncodedHeap::default();
        assert_eq!(heap.root_value(), Err(VisualizeError::MissingContent));
    }

    #[test]
    fn test_dangling_cell_reference() {
        let heap = EncodedHeap::new(
            vec![EncodedCell::new(EncodedSlot::pair(9), EncodedSlot::Null)],
            EncodedSlot::pair(0),
        );

        let root = heap.root_value().unwrap();
        let left = heap.left(root).unwrap();
        assert!(heap.is_pair(left));
        assert_eq!(
            heap.left(left),
            Err(VisualizeError::DanglingCell { cell: 9, cells: 1 })
        );
    }

    #[test]
    fn test_identity_spaces_are_disjoint() {
        let heap = EncodedHeap::new(
            vec![EncodedCell::new(
                EncodedSlot::callable(0),
                EncodedSlot::pair(0),
            )],
            EncodedSlot::pair(0),
        );

        let root = heap.root_value().unwrap();
        let callable = heap.left(root).unwrap();
        let back = heap.right(root).unwrap();
        assert_ne!(heap.identity(callable), heap.identity(back));
        assert_eq!(heap.identity(root), heap.identity(back));
    }

    #[test]
    fn test_shared_cell_shares_identity() {
        let heap = EncodedHeap::new(
            vec![
                EncodedCell::new(EncodedSlot::pair(1), EncodedSlot::pair(1)),
                EncodedCell::new(EncodedSlot::number(1.0), EncodedSlot::Null),
            ],
            EncodedSlot::pair(0),
        );

        let root = heap.root_value().unwrap();
        let left = heap.left(root).unwrap();
        let right = heap.right(root).unwrap();
        assert_eq!(heap.identity(left), heap.identity(right));
    }

    #[test]
    fn test_scalar_payloads() {
        let heap = EncodedHeap::new(
            vec![EncodedCell::new(
                EncodedSlot::string("hi"),
                EncodedSlot::boolean(true),
            )],
            EncodedSlot::pair(0),
        );

        let root = heap.root_value().unwrap();
        assert_eq!(
            heap.scalar(heap.left(root).unwrap()),
            Scalar::Str("hi".to_string())
        );
        assert_eq!(heap.scalar(heap.right(root).unwrap()), Scalar::Bool(true));
    }
}
