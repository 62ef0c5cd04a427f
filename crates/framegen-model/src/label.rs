//! Labels: named bit ranges inside a frame

use crate::range::normalize_interval;

/// A named, half-open bit range `[start, end)` of a frame
///
/// Offsets are raw bit offsets and do not depend on the view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    /// Display name
    pub name: String,
    /// First bit covered by the label
    pub start: usize,
    /// One past the last bit covered by the label
    pub end: usize,
    /// Label was synthesized by a fuzzing expansion
    pub fuzz_created: bool,
    /// Fuzzing is switched on for this label
    pub fuzz_enabled: bool,
    /// Alternate values to substitute when fuzzing (the original value is not included)
    pub fuzz_values: Vec<Vec<bool>>,
}

impl Label {
    /// Create a label over `[start, end)`; a reversed pair is swapped
    pub fn new(name: impl Into<String>, start: usize, end: usize) -> Self {
        let (start, end) = normalize_interval(start, end);
        Self {
            name: name.into(),
            start,
            end,
            fuzz_created: false,
            fuzz_enabled: false,
            fuzz_values: Vec::new(),
        }
    }

    /// Attach alternate fuzzing values and enable fuzzing
    pub fn with_fuzz_values(mut self, values: Vec<Vec<bool>>) -> Self {
        self.fuzz_values = values;
        self.fuzz_enabled = true;
        self
    }

    /// Mark the label as produced by a fuzzing expansion
    pub fn fuzz_created(mut self) -> Self {
        self.fuzz_created = true;
        self
    }

    /// Number of bits covered
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    /// Whether the label takes part in the next fuzzing expansion
    pub fn is_active_fuzzing(&self) -> bool {
        self.fuzz_enabled && !self.fuzz_values.is_empty()
    }

    /// Whether a raw bit offset falls inside the label
    pub fn contains_bit(&self, bit: usize) -> bool {
        (self.start..self.end).contains(&bit)
    }
}

#[cfg(test)]
mod tests {
    use super::Label;

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let label = Label::new("crc", 16, 8);
        assert_eq!((label.start, label.end), (8, 16));
        assert_eq!(label.width(), 8);
    }

    #[test]
    fn test_active_fuzzing_needs_values() {
        let mut label = Label::new("addr", 0, 4);
        label.fuzz_enabled = true;
        assert!(!label.is_active_fuzzing());

        let label = label.with_fuzz_values(vec![vec![true; 4]]);
        assert!(label.is_active_fuzzing());
    }
}
