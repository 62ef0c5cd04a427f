//! Rendering hints derived from label and fuzzing state
//!
//! Hints are recomputed from scratch on every call; nothing is cached or
//! patched incrementally.

use std::collections::{BTreeMap, BTreeSet};

use framegen_model::{column_span, Frame, ViewMode};
use serde::{Deserialize, Serialize};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Text color of cells covered by an actively fuzzed label (orange)
pub const FUZZING_COLOR: Rgb = Rgb(255, 165, 0);

/// A `(row, column)` cell of the frame table
pub type Cell = (usize, usize);

/// Cells the view layer should render bold and/or colored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderHints {
    /// Bold cells
    pub bold: BTreeSet<Cell>,
    /// Colored cells
    pub colors: BTreeMap<Cell, Rgb>,
}

impl RenderHints {
    /// Whether the cell is bold
    pub fn is_bold(&self, row: usize, column: usize) -> bool {
        self.bold.contains(&(row, column))
    }

    /// Text color of the cell, if any
    pub fn color(&self, row: usize, column: usize) -> Option<Rgb> {
        self.colors.get(&(row, column)).copied()
    }

    /// Whether no cell carries a hint
    pub fn is_empty(&self) -> bool {
        self.bold.is_empty() && self.colors.is_empty()
    }
}

/// Compute hints for `frames` displayed in `view`
///
/// Labels created by fuzzing are bold; labels in the frame's active fuzzing
/// set are bold and drawn in [`FUZZING_COLOR`]. Ranges are resolved on raw
/// (undecoded) content.
pub fn compute_hints(frames: &[Frame], view: ViewMode) -> RenderHints {
    let mut hints = RenderHints::default();

    for (row, frame) in frames.iter().enumerate() {
        for label in frame.labels().iter().filter(|label| label.fuzz_created) {
            let (start, end) = column_span(label, view, None);
            hints.bold.extend((start..end).map(|column| (row, column)));
        }

        for (_, label) in frame.active_fuzzing_labels() {
            let (start, end) = column_span(label, view, None);
            for column in start..end {
                hints.bold.insert((row, column));
                hints.colors.insert((row, column), FUZZING_COLOR);
            }
        }
    }

    hints
}
