//! Slot text fitting and the label escape hatch.
//!
//! Slot text must fit inside a fixed-width box half. Strings longer
//! than [`MAX_INLINE`] characters are shown as a `*N` marker and the
//! full text goes to the drawing's label table, which the facade
//! echoes to the console. Numbers, booleans and the null sentinel
//! always fit. Oversized values are an escape hatch, not an error.

use crate::draw::drawing::LabelEntry;
use crate::value::Scalar;

/// Longest string, in characters, that still fits a box slot.
pub const MAX_INLINE: usize = 5;

/// Stringify a scalar.
///
/// With `full` set the value is always stringified, which is what bare
/// top-level scalars and label table entries use. Otherwise the result
/// must fit a box slot: strings longer than [`MAX_INLINE`] characters
/// return `None`.
pub fn to_text(value: &Scalar, full: bool) -> Option<String> {
    match value {
        Scalar::Number(n) => Some(format_number(*n)),
        Scalar::Bool(b) => Some(b.to_string()),
        Scalar::Null => Some("null".to_string()),
        Scalar::Str(s) => {
            if !full && s.chars().count() > MAX_INLINE {
                None
            } else {
                Some(format!("\"{s}\""))
            }
        }
    }
}

/// Integral values print without a fractional part, matching how the
/// host runtime stringifies its numbers.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Inline text for a data slot, assigning a `*N` label when the value
/// cannot fit.
pub fn slot_text(value: &Scalar, labels: &mut LabelAllocator) -> String {
    match to_text(value, false) {
        Some(text) => text,
        None => {
            let full = to_text(value, true).unwrap_or_default();
            labels.assign(full)
        }
    }
}

/// Sequential `*N` labels for values too large to inline.
///
/// One allocator lives per paint pass, so numbering restarts at 1 for
/// every drawing.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    entries: Vec<LabelEntry>,
}

impl LabelAllocator {
    pub fn new() -> Self {
        LabelAllocator::default()
    }

    /// Assign the next label to `text`, returning the `*N` marker.
    pub fn assign(&mut self, text: String) -> String {
        let number = self.entries.len() as u32 + 1;
        self.entries.push(LabelEntry { number, text });
        format!("*{number}")
    }

    pub fn into_entries(self) -> Vec<LabelEntry> {
        self.entries
    }
}
