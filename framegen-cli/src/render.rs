//! Terminal table rendering

use framegen_edit::{FrameCollection, Rgb};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn foreground(Rgb(r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Render the collection as one line per frame: row, cells, pause
pub fn render_table(frames: &FrameCollection, color: bool) -> String {
    let view = frames.view_mode();
    let decode = frames.decode();
    let hints = frames.render_hints();
    let separator = if view.bits_per_column() == 8 { " " } else { "" };

    let mut out = format!(
        "# view: {}, decode: {}, {} frame(s)\n",
        view.name(),
        if decode { "on" } else { "off" },
        frames.len()
    );

    for (row, frame) in frames.frames().iter().enumerate() {
        let cells: Vec<String> = frame
            .column_text(view, decode)
            .into_iter()
            .enumerate()
            .map(|(column, text)| {
                if !color {
                    return text;
                }
                let mut styled = String::new();
                if hints.is_bold(row, column) {
                    styled.push_str(BOLD);
                }
                if let Some(rgb) = hints.color(row, column) {
                    styled.push_str(&foreground(rgb));
                }
                if styled.is_empty() {
                    text
                } else {
                    format!("{}{}{}", styled, text, RESET)
                }
            })
            .collect();

        out.push_str(&format!(
            "{:>4}  {}  pause={}\n",
            row,
            cells.join(separator),
            frame.pause
        ));
    }

    out
}
