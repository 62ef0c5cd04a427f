//! Label range resolution
//!
//! Maps a label's raw bit offsets into the column space of a [`ViewMode`],
//! optionally through the frame's [`Decoding`]. Column bounds are always
//! integral: the start rounds down and the end rounds up, so a label that
//! begins or ends inside a column still covers that whole column.

use crate::error::ModelError;
use crate::frame::{Decoding, Frame};
use crate::label::Label;
use crate::ViewMode;

/// Order an unordered pair so that the first element is the smaller one
pub fn normalize_interval<T: Ord>(a: T, b: T) -> (T, T) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Half-open column span of a label in `view`
///
/// `decoding` is `Some` when columns address decoded content.
pub fn column_span(label: &Label, view: ViewMode, decoding: Option<Decoding>) -> (usize, usize) {
    let (mut start, mut end) = (label.start, label.end);

    if let Some(decoding) = decoding {
        let ratio = decoding.raw_bits_per_symbol();
        start /= ratio;
        end = end.div_ceil(ratio);
    }

    let width = view.bits_per_column();
    (start / width, end.div_ceil(width))
}

/// Resolve the column range of the label at `label_index` in `frame`
///
/// The label is addressed by its position in the frame's labelset; an index
/// outside the labelset is an [`ModelError::InvalidLabelReference`].
pub fn resolve_range(
    frame: &Frame,
    label_index: usize,
    view: ViewMode,
    decode: bool,
) -> Result<(usize, usize), ModelError> {
    let label = frame
        .labels()
        .get(label_index)
        .ok_or(ModelError::InvalidLabelReference {
            index: label_index,
            count: frame.labels().len(),
        })?;

    Ok(column_span(label, view, decode.then_some(frame.decoding)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame_with(label: Label) -> Frame {
        Frame::new(vec![false; 32], 0).with_label(label)
    }

    #[test]
    fn test_normalize_interval() {
        assert_eq!(normalize_interval(5, 2), (2, 5));
        assert_eq!(normalize_interval(2, 5), (2, 5));
        assert_eq!(normalize_interval(3, 3), (3, 3));
    }

    #[test]
    fn test_bit_view_is_identity() {
        let frame = frame_with(Label::new("a", 3, 11));
        assert_eq!(resolve_range(&frame, 0, ViewMode::Bit, false), Ok((3, 11)));
    }

    #[test]
    fn test_partial_columns_round_outward() {
        let frame = frame_with(Label::new("a", 3, 9));
        // bits 3..9 touch nibbles 0, 1 and 2
        assert_eq!(resolve_range(&frame, 0, ViewMode::Hex, false), Ok((0, 3)));
        // and bytes 0 and 1
        assert_eq!(resolve_range(&frame, 0, ViewMode::Ascii, false), Ok((0, 2)));
    }

    #[test]
    fn test_decode_maps_through_manchester() {
        let frame = frame_with(Label::new("a", 4, 16)).with_decoding(Decoding::Manchester);
        assert_eq!(resolve_range(&frame, 0, ViewMode::Bit, true), Ok((2, 8)));
        assert_eq!(resolve_range(&frame, 0, ViewMode::Hex, true), Ok((0, 2)));
        // decode flag off ignores the frame's decoding
        assert_eq!(resolve_range(&frame, 0, ViewMode::Bit, false), Ok((4, 16)));
    }

    #[test]
    fn test_unknown_label_index() {
        let frame = frame_with(Label::new("a", 0, 4));
        assert_eq!(
            resolve_range(&frame, 3, ViewMode::Bit, false),
            Err(ModelError::InvalidLabelReference { index: 3, count: 1 })
        );
    }

    proptest! {
        #[test]
        fn span_covers_every_label_bit(start in 0usize..200, width in 1usize..64) {
            let label = Label::new("p", start, start + width);
            for view in [ViewMode::Bit, ViewMode::Hex, ViewMode::Ascii] {
                let (col_start, col_end) = column_span(&label, view, None);
                let k = view.bits_per_column();
                prop_assert!(col_start * k <= label.start);
                prop_assert!(col_end * k >= label.end);
                prop_assert!(col_start < col_end);
            }
        }
    }
}
