//! Script execution against a frame collection

use std::io::Write;

use framegen_edit::FrameCollection;
use tracing::{debug, info};

use crate::render::render_table;
use crate::script::{ScriptCommand, ScriptError};
use crate::settings::Settings;

/// An editing session driven by script commands
pub struct Session {
    frames: FrameCollection,
    color: bool,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            frames: FrameCollection::with_config(settings.editor.clone()),
            color: settings.color,
        }
    }

    pub fn frames(&self) -> &FrameCollection {
        &self.frames
    }

    /// Run every command in order, stopping at the first failure
    pub fn run<W: Write>(
        &mut self,
        commands: &[(usize, ScriptCommand)],
        out: &mut W,
    ) -> Result<(), ScriptError> {
        for (line, command) in commands {
            self.execute(*line, command, out)?;
        }
        Ok(())
    }

    /// Run one command; `line` is used for error reporting
    pub fn execute<W: Write>(
        &mut self,
        line: usize,
        command: &ScriptCommand,
        out: &mut W,
    ) -> Result<(), ScriptError> {
        let edit = |source| ScriptError::Edit { line, source };

        match command {
            ScriptCommand::Frame(frame) => {
                self.frames
                    .insert_from(self.frames.len(), std::slice::from_ref(frame));
            }
            ScriptCommand::Delete {
                row_start,
                row_end,
                col_start,
                col_end,
            } => {
                self.frames
                    .delete_range(*row_start, *row_end, *col_start, *col_end)
                    .map_err(edit)?;
            }
            ScriptCommand::InsertColumn(index) => self.frames.insert_column(*index),
            ScriptCommand::Duplicate(row) => self.frames.duplicate(*row).map_err(edit)?,
            ScriptCommand::Fuzz { row, mode } => {
                let generated = self.frames.fuzz(*row, *mode).map_err(edit)?;
                writeln!(out, "generated {} frame(s)", generated)?;
            }
            ScriptCommand::Clear => self.frames.clear(),
            ScriptCommand::Undo => match self.frames.undo() {
                Some(description) => info!("Undo: {}", description),
                None => debug!("Nothing to undo"),
            },
            ScriptCommand::Redo => match self.frames.redo() {
                Some(description) => info!("Redo: {}", description),
                None => debug!("Nothing to redo"),
            },
            ScriptCommand::Print => {
                write!(out, "{}", render_table(&self.frames, self.color))?;
            }
            ScriptCommand::View(view) => self.frames.set_view_mode(*view),
            ScriptCommand::Decode(decode) => self.frames.set_decode(*decode),
            ScriptCommand::LabelAt { row, column } => {
                let index = self.frames.get_selected_label_index(*row, *column);
                writeln!(out, "label at {},{}: {}", row, column, index)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn run(script: &str) -> (Session, String) {
        let settings = Settings {
            color: false,
            ..Settings::default()
        };
        let mut session = Session::new(&settings);
        let commands = parse_script(script).unwrap();
        let mut out = Vec::new();
        session.run(&commands, &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    fn bit_strings(session: &Session) -> Vec<String> {
        session
            .frames()
            .frames()
            .iter()
            .map(|f| f.to_bit_string())
            .collect()
    }

    #[test]
    fn test_edit_and_undo() {
        let (session, _) = run("frame 11110000\nframe 00001111\ndelete 1 0 2 5\nundo\nredo\n");
        assert_eq!(bit_strings(&session), vec!["1100", "0011"]);
        assert!(session.frames().can_undo());
    }

    #[test]
    fn test_fuzz_and_label_at() {
        let (session, out) = run(
            "frame 00000000 label=id:0:4 fuzz=id:1111|1010\nfuzz 0\nlabel-at 0 2\nlabel-at 0 6\nlabel-at 9 0\n",
        );
        assert_eq!(session.frames().len(), 3);
        assert_eq!(bit_strings(&session)[1], "11110000");
        assert_eq!(bit_strings(&session)[2], "10100000");
        assert_eq!(
            out,
            "generated 2 frame(s)\nlabel at 0,2: 0\nlabel at 0,6: -1\nlabel at 9,0: -1\n"
        );
    }

    #[test]
    fn test_print_uses_view_mode() {
        let (_, out) = run("frame 10100101 pause=7\nview hex\nprint\n");
        assert_eq!(out, "# view: Hex, decode: off, 1 frame(s)\n   0  a5  pause=7\n");
    }

    #[test]
    fn test_failed_edit_reports_line() {
        let mut session = Session::new(&Settings::default());
        let commands = parse_script("frame 1010\n\nduplicate 4\n").unwrap();
        let err = session.run(&commands, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ScriptError::Edit { line: 3, .. }));
        assert_eq!(session.frames().len(), 1);
    }
}
