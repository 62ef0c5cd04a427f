//! Protocol frames
//!
//! A [`Frame`] is one protocol message: its raw bits, the pause that
//! follows it on air, and the labels that name sub-ranges of the bits.
//! Structural edits ([`Frame::remove_bits`], [`Frame::insert_bits`]) keep
//! the labels aligned with the bits they describe.

use std::ops::Range;

use crate::error::ModelError;
use crate::label::Label;
use crate::range::resolve_range;
use crate::ViewMode;

/// Line coding applied to a frame's raw bits for decoded display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decoding {
    /// Non-return-to-zero, bits are shown as-is
    #[default]
    Nrz,
    /// Inverted NRZ
    NrzInverted,
    /// Manchester (IEEE 802.3): `10` is a one, `01` is a zero
    Manchester,
}

impl Decoding {
    /// Returns a human-readable name for the decoding
    pub fn name(&self) -> &'static str {
        match self {
            Decoding::Nrz => "NRZ",
            Decoding::NrzInverted => "NRZ-I",
            Decoding::Manchester => "Manchester",
        }
    }

    /// Parse a decoding from its short name (`nrz`, `inverted`, `manchester`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nrz" => Some(Decoding::Nrz),
            "inverted" | "nrz-i" | "nrzi" => Some(Decoding::NrzInverted),
            "manchester" => Some(Decoding::Manchester),
            _ => None,
        }
    }

    /// Number of raw bits consumed per decoded bit
    pub fn raw_bits_per_symbol(&self) -> usize {
        match self {
            Decoding::Nrz | Decoding::NrzInverted => 1,
            Decoding::Manchester => 2,
        }
    }

    /// Decode raw bits
    ///
    /// Invalid Manchester pairs (`00`, `11`) decode to zero; a trailing odd
    /// bit is dropped.
    pub fn decode(&self, bits: &[bool]) -> Vec<bool> {
        match self {
            Decoding::Nrz => bits.to_vec(),
            Decoding::NrzInverted => bits.iter().map(|bit| !bit).collect(),
            Decoding::Manchester => bits
                .chunks_exact(2)
                .map(|pair| pair[0] && !pair[1])
                .collect(),
        }
    }
}

/// Parse a string of `0`/`1` characters into bits
pub fn parse_bits(s: &str) -> Result<Vec<bool>, ModelError> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(ModelError::InvalidBits(format!(
                "unexpected character {:?} in {:?}",
                other, s
            ))),
        })
        .collect()
}

/// One protocol message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub(crate) bits: Vec<bool>,
    /// Pause after the frame, in samples
    pub pause: u32,
    /// Frame was synthesized by a fuzzing expansion
    pub fuzz_created: bool,
    /// Decoding used when columns address decoded content
    pub decoding: Decoding,
    pub(crate) labels: Vec<Label>,
}

impl Frame {
    /// Create a frame from raw bits and a trailing pause
    pub fn new(bits: Vec<bool>, pause: u32) -> Self {
        Self {
            bits,
            pause,
            ..Default::default()
        }
    }

    /// Create a frame from a `0`/`1` string with no pause
    pub fn from_bit_str(s: &str) -> Result<Self, ModelError> {
        Ok(Self::new(parse_bits(s)?, 0))
    }

    /// Set the trailing pause
    pub fn with_pause(mut self, pause: u32) -> Self {
        self.pause = pause;
        self
    }

    /// Append a label to the labelset
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Set the decoding
    pub fn with_decoding(mut self, decoding: Decoding) -> Self {
        self.decoding = decoding;
        self
    }

    /// Raw bits
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of raw bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the frame has no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Labels in display order
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Mutable access to a label, e.g. to toggle fuzzing
    pub fn label_mut(&mut self, index: usize) -> Option<&mut Label> {
        self.labels.get_mut(index)
    }

    /// Append a label to the labelset
    pub fn push_label(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Index of the first label with the given name
    pub fn label_index(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label.name == name)
    }

    /// Column range of a label, see [`resolve_range`]
    pub fn label_range(
        &self,
        label_index: usize,
        view: ViewMode,
        decode: bool,
    ) -> Result<(usize, usize), ModelError> {
        resolve_range(self, label_index, view, decode)
    }

    /// Labels that take part in the next fuzzing expansion, with their indices
    pub fn active_fuzzing_labels(&self) -> impl Iterator<Item = (usize, &Label)> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_active_fuzzing())
    }

    /// Bits after applying the frame's decoding
    pub fn decoded_bits(&self) -> Vec<bool> {
        self.decoding.decode(&self.bits)
    }

    /// Number of columns the frame occupies in `view`
    pub fn column_count(&self, view: ViewMode, decode: bool) -> usize {
        let bits = if decode {
            self.bits.len() / self.decoding.raw_bits_per_symbol()
        } else {
            self.bits.len()
        };
        bits.div_ceil(view.bits_per_column())
    }

    /// Remove a range of raw bits, keeping labels aligned
    ///
    /// The range is clamped to the frame. Labels after the range shift left,
    /// labels overlapping it shrink, and labels left without bits are
    /// dropped. Returns the number of bits removed.
    pub fn remove_bits(&mut self, range: Range<usize>) -> usize {
        let start = range.start.min(self.bits.len());
        let end = range.end.min(self.bits.len()).max(start);
        let removed = end - start;
        if removed == 0 {
            return 0;
        }

        self.bits.drain(start..end);

        let shift = |offset: usize| {
            if offset <= start {
                offset
            } else if offset >= end {
                offset - removed
            } else {
                start
            }
        };
        for label in &mut self.labels {
            label.start = shift(label.start);
            label.end = shift(label.end);
        }
        self.labels.retain(|label| label.start < label.end);

        removed
    }

    /// Insert `count` zero bits at `pos` (clamped to the end of the frame)
    ///
    /// Labels starting at or after `pos` shift right; a label that strictly
    /// contains `pos` grows.
    pub fn insert_bits(&mut self, pos: usize, count: usize) {
        let pos = pos.min(self.bits.len());
        self.bits
            .splice(pos..pos, std::iter::repeat(false).take(count));

        for label in &mut self.labels {
            if label.start >= pos {
                label.start += count;
                label.end += count;
            } else if label.end > pos {
                label.end += count;
            }
        }
    }
}
