//! Linear undo/redo history
//!
//! The [`CommandLog`] records commands that have already been applied to a
//! frame list. A cursor separates applied commands from undone ones:
//!
//! ```text
//! push(c1) push(c2) push(c3)      [c1, c2, c3 | ]
//! undo() x2                       [c1 | c2, c3]
//! push(c4)  <-- drops the redo tail
//!                                 [c1, c4 | ]
//! ```
//!
//! # Invariants
//!
//! 1. commands below the cursor are applied, commands at or above it are not
//! 2. replaying the applied commands over the baseline yields the live frames
//! 3. `len() <= max_depth` after every push; evicted commands are folded
//!    into the baseline so invariant 2 keeps holding

use framegen_model::Frame;
use tracing::debug;

use crate::command::EditCommand;

/// Default number of commands kept in history
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Undo/redo history for one frame collection
#[derive(Debug, Clone)]
pub struct CommandLog {
    commands: Vec<EditCommand>,
    cursor: usize,
    max_depth: usize,
    baseline: Vec<Frame>,
}

impl CommandLog {
    /// Create an empty log over an empty baseline
    pub fn new(max_depth: usize) -> Self {
        Self::with_baseline(Vec::new(), max_depth)
    }

    /// Create an empty log whose replay starts from `baseline`
    pub fn with_baseline(baseline: Vec<Frame>, max_depth: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            max_depth: max_depth.max(1),
            baseline,
        }
    }

    /// Record a command that has already been applied
    pub fn push(&mut self, cmd: EditCommand) {
        if self.cursor < self.commands.len() {
            debug!(
                "Discarding {} undone commands",
                self.commands.len() - self.cursor
            );
            self.commands.truncate(self.cursor);
        }

        self.commands.push(cmd);
        self.cursor = self.commands.len();

        while self.commands.len() > self.max_depth {
            let mut oldest = self.commands.remove(0);
            oldest.apply(&mut self.baseline);
            self.cursor -= 1;
            debug!("Evicted '{}' from history", oldest.description());
        }
    }

    /// Revert the most recent applied command
    ///
    /// Returns the description of the undone command, or `None` if there
    /// was nothing to undo.
    pub fn undo(&mut self, frames: &mut Vec<Frame>) -> Option<&'static str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        let cmd = &self.commands[self.cursor];
        cmd.revert(frames);
        debug!("Undo '{}'", cmd.description());
        Some(cmd.description())
    }

    /// Re-apply the most recently undone command
    pub fn redo(&mut self, frames: &mut Vec<Frame>) -> Option<&'static str> {
        let cmd = self.commands.get_mut(self.cursor)?;
        cmd.apply(frames);
        self.cursor += 1;
        debug!("Redo '{}'", cmd.description());
        Some(cmd.description())
    }

    /// Whether there is a command to undo
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether there is a command to redo
    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Number of recorded commands, applied or undone
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the log records nothing
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of applied commands
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Maximum number of commands kept
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Applied commands, oldest first
    pub fn applied(&self) -> &[EditCommand] {
        &self.commands[..self.cursor]
    }

    /// Rebuild the frame list from the baseline and the applied commands
    pub fn replay(&self) -> Vec<Frame> {
        let mut frames = self.baseline.clone();
        for cmd in self.applied() {
            cmd.clone().apply(&mut frames);
        }
        frames
    }
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(bits: &str) -> Frame {
        Frame::from_bit_str(bits).unwrap()
    }

    fn push_insert(log: &mut CommandLog, frames: &mut Vec<Frame>, row: usize, bits: &str) {
        let mut cmd = EditCommand::insert_frames(row, vec![frame(bits)]);
        cmd.apply(frames);
        log.push(cmd);
    }

    #[test]
    fn test_undo_redo() {
        let mut log = CommandLog::default();
        let mut frames = Vec::new();
        push_insert(&mut log, &mut frames, 0, "1");
        push_insert(&mut log, &mut frames, 1, "0");

        assert_eq!(log.undo(&mut frames), Some("Insert frames"));
        assert_eq!(frames.len(), 1);
        assert!(log.can_redo());

        assert_eq!(log.redo(&mut frames), Some("Insert frames"));
        assert_eq!(frames.len(), 2);
        assert!(!log.can_redo());
        assert_eq!(log.redo(&mut frames), None);
    }

    #[test]
    fn test_undo_on_empty_log() {
        let mut log = CommandLog::default();
        let mut frames = vec![frame("1")];
        assert_eq!(log.undo(&mut frames), None);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_push_discards_redo_tail() {
        let mut log = CommandLog::default();
        let mut frames = Vec::new();
        push_insert(&mut log, &mut frames, 0, "1");
        push_insert(&mut log, &mut frames, 1, "10");
        log.undo(&mut frames);

        push_insert(&mut log, &mut frames, 1, "111");
        assert_eq!(log.len(), 2);
        assert!(!log.can_redo());
        assert_eq!(frames[1].to_bit_string(), "111");
    }

    #[test]
    fn test_eviction_keeps_replay_exact() {
        let mut log = CommandLog::new(2);
        let mut frames = Vec::new();
        for bits in ["1", "10", "100", "1000"] {
            push_insert(&mut log, &mut frames, 0, bits);
        }

        assert_eq!(log.len(), 2);
        assert_eq!(log.replay(), frames);

        log.undo(&mut frames);
        log.undo(&mut frames);
        assert!(!log.can_undo());
        assert_eq!(frames.len(), 2);
        assert_eq!(log.replay(), frames);
    }
}
