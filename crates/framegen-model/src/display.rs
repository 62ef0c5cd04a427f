//! Text rendering of frame content per view mode
//!
//! Each column of a frame is rendered as a single-character string so the
//! view layer can place one cell per column. A trailing partial column is
//! zero-padded on the right before conversion.

use crate::frame::Frame;
use crate::ViewMode;

impl Frame {
    /// Render every column of the frame in `view`
    pub fn column_text(&self, view: ViewMode, decode: bool) -> Vec<String> {
        let content = if decode {
            self.decoded_bits()
        } else {
            self.bits.clone()
        };

        content
            .chunks(view.bits_per_column())
            .map(|chunk| render_column(chunk, view))
            .collect()
    }

    /// Raw bits as a `0`/`1` string
    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
    }
}

fn render_column(chunk: &[bool], view: ViewMode) -> String {
    let width = view.bits_per_column();
    let value = chunk
        .iter()
        .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
        << (width - chunk.len());

    match view {
        ViewMode::Bit => value.to_string(),
        ViewMode::Hex => format!("{:x}", value),
        ViewMode::Ascii => {
            if value.is_ascii_graphic() || value == b' ' {
                char::from(value).to_string()
            } else {
                ".".to_string()
            }
        }
    }
}
