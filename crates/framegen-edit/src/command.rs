//! Reversible structural edits
//!
//! Every structural change to a frame collection is an [`EditCommand`].
//! A command owns copies of everything it needs to undo itself; it never
//! keeps references into the collection.
//!
//! # Invariants
//!
//! - `apply()` followed by `revert()` restores the prior frames exactly
//! - `apply()` (re)captures its revert data from the frames it is applied
//!   to, so a command can be replayed on any state equal to the original one
//! - neither method panics, whatever the frames look like

use framegen_model::{Frame, ViewMode};

/// A structural edit of a frame list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Remove every frame
    Clear {
        /// Frames removed by the last apply
        removed: Vec<Frame>,
    },

    /// Delete view columns `[col_start, col_end]` in rows `[row_start, row_end]`
    DeleteRange {
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
        /// View the column indices are expressed in
        view: ViewMode,
        /// Rows `row_start..=row_end` before the delete
        previous: Vec<Frame>,
        /// Rows of the range that survived the delete
        remaining: usize,
    },

    /// Insert one empty column at `index` in every frame long enough
    InsertColumn {
        index: usize,
        view: ViewMode,
        /// Frames touched by the last apply, before the insert
        previous: Vec<(usize, Frame)>,
    },

    /// Insert copies of frames at `row`
    InsertFrames { row: usize, frames: Vec<Frame> },

    /// Insert a copy of the frame at `row` right after it
    Duplicate { row: usize },
}

impl EditCommand {
    /// Command that clears the collection
    pub fn clear() -> Self {
        Self::Clear {
            removed: Vec::new(),
        }
    }

    /// Command that deletes a rectangle of columns
    ///
    /// Bounds must already be ordered (`row_start <= row_end`,
    /// `col_start <= col_end`).
    pub fn delete_range(
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
        view: ViewMode,
    ) -> Self {
        Self::DeleteRange {
            row_start,
            row_end,
            col_start,
            col_end,
            view,
            previous: Vec::new(),
            remaining: 0,
        }
    }

    /// Command that inserts an empty column
    pub fn insert_column(index: usize, view: ViewMode) -> Self {
        Self::InsertColumn {
            index,
            view,
            previous: Vec::new(),
        }
    }

    /// Command that inserts frames at `row`
    pub fn insert_frames(row: usize, frames: Vec<Frame>) -> Self {
        Self::InsertFrames { row, frames }
    }

    /// Command that duplicates the frame at `row`
    pub fn duplicate(row: usize) -> Self {
        Self::Duplicate { row }
    }

    /// Short description for logs and undo menus
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear { .. } => "Clear",
            Self::DeleteRange { .. } => "Delete range",
            Self::InsertColumn { .. } => "Insert column",
            Self::InsertFrames { .. } => "Insert frames",
            Self::Duplicate { .. } => "Duplicate frame",
        }
    }

    /// Apply the edit to `frames`
    pub fn apply(&mut self, frames: &mut Vec<Frame>) {
        match self {
            Self::Clear { removed } => {
                *removed = std::mem::take(frames);
            }
            Self::DeleteRange {
                row_start,
                row_end,
                col_start,
                col_end,
                view,
                previous,
                remaining,
            } => {
                let start = *row_start;
                if start >= frames.len() {
                    previous.clear();
                    *remaining = 0;
                    return;
                }
                let last = (*row_end).min(frames.len() - 1);
                let width = view.bits_per_column();
                let bits = col_start.saturating_mul(width)
                    ..col_end.saturating_add(1).saturating_mul(width);

                *previous = frames[start..=last].to_vec();
                let kept: Vec<Frame> = frames
                    .drain(start..=last)
                    .filter_map(|mut frame| {
                        let removed = frame.remove_bits(bits.clone());
                        // a frame emptied by this delete goes away with its pause
                        if removed > 0 && frame.is_empty() {
                            None
                        } else {
                            Some(frame)
                        }
                    })
                    .collect();
                *remaining = kept.len();
                frames.splice(start..start, kept);
            }
            Self::InsertColumn {
                index,
                view,
                previous,
            } => {
                let width = view.bits_per_column();
                let pos = index.saturating_mul(width);
                previous.clear();
                for (row, frame) in frames.iter_mut().enumerate() {
                    if pos <= frame.len() {
                        previous.push((row, frame.clone()));
                        frame.insert_bits(pos, width);
                    }
                }
            }
            Self::InsertFrames {
                row,
                frames: inserted,
            } => {
                *row = (*row).min(frames.len());
                frames.splice(*row..*row, inserted.iter().cloned());
            }
            Self::Duplicate { row } => {
                if let Some(frame) = frames.get(*row).cloned() {
                    frames.insert(*row + 1, frame);
                }
            }
        }
    }

    /// Undo the effect of the last [`apply`](Self::apply)
    pub fn revert(&self, frames: &mut Vec<Frame>) {
        match self {
            Self::Clear { removed } => {
                *frames = removed.clone();
            }
            Self::DeleteRange {
                row_start,
                previous,
                remaining,
                ..
            } => {
                let start = (*row_start).min(frames.len());
                let end = (start + remaining).min(frames.len());
                frames.splice(start..end, previous.iter().cloned());
            }
            Self::InsertColumn { previous, .. } => {
                for (row, frame) in previous {
                    if let Some(slot) = frames.get_mut(*row) {
                        *slot = frame.clone();
                    }
                }
            }
            Self::InsertFrames {
                row,
                frames: inserted,
            } => {
                let start = (*row).min(frames.len());
                let end = (start + inserted.len()).min(frames.len());
                frames.drain(start..end);
            }
            Self::Duplicate { row } => {
                if row.saturating_add(1) < frames.len() {
                    frames.remove(*row + 1);
                }
            }
        }
    }
}
