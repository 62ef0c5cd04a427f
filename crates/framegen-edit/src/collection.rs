//! Frame collection editing engine
//!
//! The [`FrameCollection`] owns the ordered frames of a generator session
//! together with the session's view settings and its [`CommandLog`].
//! Structural edits are built as [`EditCommand`]s, applied, and recorded in
//! the log; the frames are never mutated any other way, so the log can always
//! undo, redo and replay every change.

use framegen_model::{normalize_interval, Frame, FuzzMode, ModelError, ViewMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::command::EditCommand;
use crate::error::EditError;
use crate::hints::{compute_hints, RenderHints};
use crate::history::{CommandLog, DEFAULT_HISTORY_DEPTH};
use crate::merge::{merge_selection, parse_payload, SelectionTree};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Column coordinate system
    pub view_mode: ViewMode,
    /// Show decoded content
    pub decode: bool,
    /// Maximum number of commands kept for undo
    pub history_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Bit,
            decode: false,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

/// Ordered frames of one editing session
#[derive(Debug, Clone)]
pub struct FrameCollection {
    frames: Vec<Frame>,
    view_mode: ViewMode,
    decode: bool,
    log: CommandLog,
}

impl FrameCollection {
    /// Create an empty collection with default configuration
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty collection
    pub fn with_config(config: EditorConfig) -> Self {
        Self::from_frames(Vec::new(), config)
    }

    /// Create a collection holding `frames`
    ///
    /// The frames become the baseline of the history: they can not be
    /// undone, and replay starts from them.
    pub fn from_frames(frames: Vec<Frame>, config: EditorConfig) -> Self {
        Self {
            log: CommandLog::with_baseline(frames.clone(), config.history_depth),
            frames,
            view_mode: config.view_mode,
            decode: config.decode,
        }
    }

    /// Current configuration
    pub fn config(&self) -> EditorConfig {
        EditorConfig {
            view_mode: self.view_mode,
            decode: self.decode,
            history_depth: self.log.max_depth(),
        }
    }

    /// Frames in display order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `row`
    pub fn frame(&self, row: usize) -> Option<&Frame> {
        self.frames.get(row)
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the collection has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Column coordinate system
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Change the column coordinate system
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Whether decoded content is shown
    pub fn decode(&self) -> bool {
        self.decode
    }

    /// Show raw or decoded content
    pub fn set_decode(&mut self, decode: bool) {
        self.decode = decode;
    }

    /// Undo history
    pub fn history(&self) -> &CommandLog {
        &self.log
    }

    /// Apply a command and record it
    fn execute(&mut self, mut cmd: EditCommand) {
        cmd.apply(&mut self.frames);
        debug!("Applied '{}', {} frames", cmd.description(), self.frames.len());
        self.log.push(cmd);
    }

    fn check_row(&self, row: usize) -> Result<(), EditError> {
        if row < self.frames.len() {
            Ok(())
        } else {
            Err(EditError::RowOutOfRange {
                row,
                len: self.frames.len(),
            })
        }
    }

    /// Insert a copy of the frame at `row` directly after it
    pub fn duplicate(&mut self, row: usize) -> Result<(), EditError> {
        self.check_row(row)?;
        self.execute(EditCommand::duplicate(row));
        info!("Duplicated frame {}", row);
        Ok(())
    }

    /// Delete view columns `[col_start, col_end]` in rows `[row_start, row_end]`
    ///
    /// Both pairs may be given in either order. Frames emptied by the
    /// delete are removed along with their pause.
    pub fn delete_range(
        &mut self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<(), EditError> {
        let (row_start, row_end) = normalize_interval(row_start, row_end);
        let (col_start, col_end) = normalize_interval(col_start, col_end);
        self.check_row(row_end)?;

        let before = self.frames.len();
        self.execute(EditCommand::delete_range(
            row_start,
            row_end,
            col_start,
            col_end,
            self.view_mode,
        ));
        info!(
            "Deleted columns {}..={} in rows {}..={} ({} frames removed)",
            col_start,
            col_end,
            row_start,
            row_end,
            before - self.frames.len()
        );
        Ok(())
    }

    /// Remove every frame
    pub fn clear(&mut self) {
        let count = self.frames.len();
        self.execute(EditCommand::clear());
        info!("Cleared {} frames", count);
    }

    /// Insert one empty column at `index` in the current view mode
    pub fn insert_column(&mut self, index: usize) {
        self.execute(EditCommand::insert_column(index, self.view_mode));
        info!("Inserted {} column at {}", self.view_mode.name(), index);
    }

    /// Insert copies of `source` at `row`; a row past the end appends
    pub fn insert_from(&mut self, row: usize, source: &[Frame]) {
        let row = row.min(self.frames.len());
        self.execute(EditCommand::insert_frames(row, source.to_vec()));
        info!("Inserted {} frames at {}", source.len(), row);
    }

    /// Expand the fuzzing labels of the frame at `row` into new frames
    /// inserted right after it
    ///
    /// Returns the number of frames generated.
    pub fn fuzz(&mut self, row: usize, mode: FuzzMode) -> Result<usize, EditError> {
        self.check_row(row)?;
        let generated = self.frames[row].fuzz(mode);
        let count = generated.len();
        if count == 0 {
            warn!("Frame {} has no active fuzzing labels", row);
            return Ok(0);
        }
        self.execute(EditCommand::insert_frames(row + 1, generated));
        info!("{} fuzzing of frame {} generated {} frames", mode.name(), row, count);
        Ok(count)
    }

    /// Import the nodes named by a drop payload at `drop_row`
    ///
    /// `None` drops at the end of the collection. Each node becomes one
    /// logged insert; nodes end up in merged order. Nothing is inserted if
    /// the payload is malformed or names a missing node. Returns the number
    /// of nodes imported.
    pub fn import<T: SelectionTree + ?Sized>(
        &mut self,
        payload: &str,
        tree: &T,
        drop_row: Option<usize>,
    ) -> Result<usize, EditError> {
        let refs = parse_payload(payload)?;
        let nodes = merge_selection(tree, &refs)?;
        let row = drop_row
            .unwrap_or(self.frames.len())
            .min(self.frames.len());

        let mut imported = 0;
        for &node in nodes.iter().rev() {
            let frames = tree.frames(node);
            if frames.is_empty() {
                debug!("Skipping node {:?} without frames", node);
                continue;
            }
            self.execute(EditCommand::insert_frames(row, frames.to_vec()));
            imported += 1;
        }

        info!("Imported {} nodes at row {}", imported, row);
        Ok(imported)
    }

    /// Undo the last edit; returns its description
    pub fn undo(&mut self) -> Option<&'static str> {
        self.log.undo(&mut self.frames)
    }

    /// Redo the last undone edit; returns its description
    pub fn redo(&mut self) -> Option<&'static str> {
        self.log.redo(&mut self.frames)
    }

    /// Whether there is an edit to undo
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Whether there is an edit to redo
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// Rebuild the frames from the history baseline and applied edits
    pub fn replay(&self) -> Vec<Frame> {
        self.log.replay()
    }

    /// Column range of a label in the current view and decode setting
    pub fn label_range(&self, row: usize, label_index: usize) -> Result<(usize, usize), EditError> {
        self.check_row(row)?;
        self.frames[row]
            .label_range(label_index, self.view_mode, self.decode)
            .map_err(|e| match e {
                ModelError::InvalidLabelReference { index, .. } => {
                    EditError::InvalidLabelReference { row, index }
                }
                other => EditError::Model(other),
            })
    }

    /// Index of the label covering `column` on `row`
    ///
    /// A row outside the collection is logged and treated as no selection.
    pub fn selected_label_index(&self, row: usize, column: usize) -> Option<usize> {
        let Some(frame) = self.frames.get(row) else {
            warn!("Row {} is out of range ({} frames)", row, self.frames.len());
            return None;
        };

        (0..frame.labels().len()).find(|&index| {
            frame
                .label_range(index, self.view_mode, false)
                .is_ok_and(|(start, end)| (start..end).contains(&column))
        })
    }

    /// Bold/color hints for the current state
    pub fn render_hints(&self) -> RenderHints {
        compute_hints(&self.frames, self.view_mode)
    }
}

impl Default for FrameCollection {
    fn default() -> Self {
        Self::new()
    }
}
