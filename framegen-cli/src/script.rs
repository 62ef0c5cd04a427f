//! Edit script parsing
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! frame 1010101011110000 pause=1000 label=sync:0:8 fuzz=sync:11111111|00000000
//! delete 0 1 2 5
//! insert-column 3
//! duplicate 0
//! fuzz 0 successive
//! view hex
//! decode on
//! label-at 0 3
//! undo
//! redo
//! clear
//! print
//! ```

use framegen_edit::EditError;
use framegen_model::{parse_bits, Decoding, Frame, FuzzMode, Label, ModelError, ViewMode};
use thiserror::Error;

/// Errors from parsing or running a script
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Command word not recognized
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },

    /// Missing or unparsable argument
    #[error("line {line}: {message}")]
    InvalidArgument { line: usize, message: String },

    /// Bad bit string
    #[error("line {line}: {source}")]
    Model {
        line: usize,
        #[source]
        source: ModelError,
    },

    /// Edit rejected by the collection
    #[error("line {line}: {source}")]
    Edit {
        line: usize,
        #[source]
        source: EditError,
    },

    /// Reading the script or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed script command
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// Append a frame
    Frame(Frame),
    /// Delete a rectangle of columns
    Delete {
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    },
    /// Insert an empty column
    InsertColumn(usize),
    /// Duplicate a frame
    Duplicate(usize),
    /// Expand fuzzing labels of a frame
    Fuzz { row: usize, mode: FuzzMode },
    /// Remove every frame
    Clear,
    /// Undo the last edit
    Undo,
    /// Redo the last undone edit
    Redo,
    /// Print the table
    Print,
    /// Switch the view mode
    View(ViewMode),
    /// Toggle decoded display
    Decode(bool),
    /// Print the label index under a cell
    LabelAt { row: usize, column: usize },
}

/// Parse a whole script into `(line number, command)` pairs
pub fn parse_script(text: &str) -> Result<Vec<(usize, ScriptCommand)>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if let Some(cmd) = parse_line(line, raw)? {
            commands.push((line, cmd));
        }
    }
    Ok(commands)
}

/// Parse one line; comments and blank lines yield `None`
pub fn parse_line(line: usize, raw: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let text = raw.split('#').next().unwrap_or("").trim();
    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let arg = |i: usize| -> Result<usize, ScriptError> { number(line, args.get(i).copied()) };

    let cmd = match command {
        "frame" => ScriptCommand::Frame(parse_frame(line, &args)?),
        "delete" => ScriptCommand::Delete {
            row_start: arg(0)?,
            row_end: arg(1)?,
            col_start: arg(2)?,
            col_end: arg(3)?,
        },
        "insert-column" => ScriptCommand::InsertColumn(arg(0)?),
        "duplicate" => ScriptCommand::Duplicate(arg(0)?),
        "fuzz" => {
            let mode = match args.get(1) {
                None => FuzzMode::default(),
                Some(name) => FuzzMode::from_name(name)
                    .ok_or_else(|| invalid(line, format!("unknown fuzz mode {:?}", name)))?,
            };
            ScriptCommand::Fuzz { row: arg(0)?, mode }
        }
        "clear" => ScriptCommand::Clear,
        "undo" => ScriptCommand::Undo,
        "redo" => ScriptCommand::Redo,
        "print" => ScriptCommand::Print,
        "view" => {
            let name = args.first().copied().unwrap_or_default();
            ScriptCommand::View(
                ViewMode::from_name(name)
                    .ok_or_else(|| invalid(line, format!("unknown view mode {:?}", name)))?,
            )
        }
        "decode" => match args.first().copied() {
            Some("on") => ScriptCommand::Decode(true),
            Some("off") => ScriptCommand::Decode(false),
            other => return Err(invalid(line, format!("expected on/off, got {:?}", other))),
        },
        "label-at" => ScriptCommand::LabelAt {
            row: arg(0)?,
            column: arg(1)?,
        },
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    Ok(Some(cmd))
}

fn invalid(line: usize, message: String) -> ScriptError {
    ScriptError::InvalidArgument { line, message }
}

fn number(line: usize, text: Option<&str>) -> Result<usize, ScriptError> {
    let text = text.ok_or_else(|| invalid(line, "missing argument".to_string()))?;
    text.parse()
        .map_err(|_| invalid(line, format!("expected a number, got {:?}", text)))
}

fn bits(line: usize, text: &str) -> Result<Vec<bool>, ScriptError> {
    parse_bits(text).map_err(|source| ScriptError::Model { line, source })
}

fn parse_frame(line: usize, args: &[&str]) -> Result<Frame, ScriptError> {
    let (first, options) = args
        .split_first()
        .ok_or_else(|| invalid(line, "frame needs a bit string".to_string()))?;
    let mut frame = Frame::new(bits(line, first)?, 0);

    for option in options {
        let (key, value) = option
            .split_once('=')
            .ok_or_else(|| invalid(line, format!("expected key=value, got {:?}", option)))?;
        match key {
            "pause" => {
                frame.pause = value
                    .parse()
                    .map_err(|_| invalid(line, format!("expected a u32 pause, got {:?}", value)))?;
            }
            "decoding" => {
                frame.decoding = Decoding::from_name(value)
                    .ok_or_else(|| invalid(line, format!("unknown decoding {:?}", value)))?;
            }
            "label" => {
                let parts: Vec<&str> = value.split(':').collect();
                let [name, start, end] = parts[..] else {
                    return Err(invalid(line, format!("expected name:start:end, got {:?}", value)));
                };
                frame.push_label(Label::new(
                    name,
                    number(line, Some(start))?,
                    number(line, Some(end))?,
                ));
            }
            "fuzz" => {
                let (name, values) = value
                    .split_once(':')
                    .ok_or_else(|| invalid(line, format!("expected name:v1|v2, got {:?}", value)))?;
                let index = frame
                    .label_index(name)
                    .ok_or_else(|| invalid(line, format!("no label named {:?}", name)))?;
                let values = values
                    .split('|')
                    .map(|v| bits(line, v))
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(label) = frame.label_mut(index) {
                    label.fuzz_values = values;
                    label.fuzz_enabled = true;
                }
            }
            other => return Err(invalid(line, format!("unknown frame option {:?}", other))),
        }
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_frame_line() {
        let cmd = parse_line(1, "frame 10101010 pause=250 label=id:0:4 fuzz=id:1111|0000")
            .unwrap()
            .unwrap();
        let ScriptCommand::Frame(frame) = cmd else {
            panic!("expected a frame, got {:?}", cmd);
        };
        assert_eq!(frame.to_bit_string(), "10101010");
        assert_eq!(frame.pause, 250);
        assert_eq!(frame.labels()[0].name, "id");
        assert!(frame.labels()[0].is_active_fuzzing());
        assert_eq!(frame.labels()[0].fuzz_values.len(), 2);
    }

    #[test]
    fn test_parse_commands() {
        let script = "# header\n\ndelete 3 1 5 2\nview hex  # trailing\nfuzz 0 exhaustive\nundo\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                (
                    3,
                    ScriptCommand::Delete {
                        row_start: 3,
                        row_end: 1,
                        col_start: 5,
                        col_end: 2
                    }
                ),
                (4, ScriptCommand::View(ViewMode::Hex)),
                (
                    5,
                    ScriptCommand::Fuzz {
                        row: 0,
                        mode: FuzzMode::Exhaustive
                    }
                ),
                (6, ScriptCommand::Undo),
            ]
        );
    }

    #[test]
    fn test_pause_at_u32_limit() {
        let cmd = parse_line(1, "frame 1 pause=4294967295").unwrap().unwrap();
        assert!(matches!(cmd, ScriptCommand::Frame(frame) if frame.pause == u32::MAX));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_script("undo\nfly 3\n").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownCommand { line: 2, .. }));

        let err = parse_line(7, "frame 10x1").unwrap_err();
        assert!(matches!(err, ScriptError::Model { line: 7, .. }));

        let err = parse_line(1, "frame 1010 fuzz=missing:1").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidArgument { .. }));

        let err = parse_line(4, "frame 1 pause=4294967297").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidArgument { line: 4, .. }));

        let err = parse_line(1, "delete 1 2").unwrap_err();
        assert_eq!(err.to_string(), "line 1: missing argument");
    }

    proptest! {
        #[test]
        fn parse_line_never_panics(line in ".{0,40}") {
            let _ = parse_line(1, &line);
        }
    }
}
