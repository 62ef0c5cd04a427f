//! Frame Model Library
//!
//! This crate provides the data model behind a protocol generator:
//!
//! - **Frame**: one protocol message, a bit sequence plus a trailing pause
//! - **Label**: a named bit range of a frame, optionally carrying alternate
//!   fuzzing values
//! - **ViewMode**: the column coordinate system a frame is displayed in
//!   (bits, hex nibbles or ASCII bytes)
//! - **Decoding**: the line coding applied before decoded display
//!
//! # Architecture
//!
//! Label offsets are always stored in raw bit coordinates. The range
//! resolver in [`range`] maps them into the column space of a view mode,
//! optionally through the frame's decoding, so callers never store
//! view-dependent offsets.
//!
//! # Example
//!
//! ```rust
//! use framegen_model::{Frame, Label, ViewMode};
//!
//! let frame = Frame::from_bit_str("1010101011110000")
//!     .unwrap()
//!     .with_label(Label::new("sync", 0, 8));
//!
//! assert_eq!(frame.label_range(0, ViewMode::Bit, false), Ok((0, 8)));
//! assert_eq!(frame.label_range(0, ViewMode::Hex, false), Ok((0, 2)));
//! assert_eq!(frame.label_range(0, ViewMode::Ascii, false), Ok((0, 1)));
//! ```

pub mod display;
pub mod error;
pub mod frame;
pub mod fuzz;
pub mod label;
pub mod range;

pub use error::ModelError;
pub use frame::{parse_bits, Decoding, Frame};
pub use fuzz::FuzzMode;
pub use label::Label;
pub use range::{column_span, normalize_interval, resolve_range};

/// Column coordinate system used to display and address frame content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewMode {
    /// One column per bit
    #[default]
    Bit,
    /// One column per hex nibble (4 bits)
    Hex,
    /// One column per ASCII byte (8 bits)
    Ascii,
}

impl ViewMode {
    /// Returns a human-readable name for the view mode
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Bit => "Bit",
            ViewMode::Hex => "Hex",
            ViewMode::Ascii => "ASCII",
        }
    }

    /// Number of raw bits covered by one column
    pub fn bits_per_column(&self) -> usize {
        match self {
            ViewMode::Bit => 1,
            ViewMode::Hex => 4,
            ViewMode::Ascii => 8,
        }
    }

    /// Parse a view mode from its lowercase short name (`bit`, `hex`, `ascii`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bit" | "bits" => Some(ViewMode::Bit),
            "hex" => Some(ViewMode::Hex),
            "ascii" => Some(ViewMode::Ascii),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewMode;

    #[test]
    fn test_bits_per_column() {
        assert_eq!(ViewMode::Bit.bits_per_column(), 1);
        assert_eq!(ViewMode::Hex.bits_per_column(), 4);
        assert_eq!(ViewMode::Ascii.bits_per_column(), 8);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ViewMode::from_name("HEX"), Some(ViewMode::Hex));
        assert_eq!(ViewMode::from_name("bits"), Some(ViewMode::Bit));
        assert_eq!(ViewMode::from_name("octal"), None);
    }
}
