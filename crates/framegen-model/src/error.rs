//! Error types for the frame model

use thiserror::Error;

/// Errors that can occur while building or querying frames
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Label index is not part of the frame's labelset
    #[error("invalid label reference: index {index} but frame has {count} labels")]
    InvalidLabelReference { index: usize, count: usize },

    /// Bit string contains something other than `0`/`1`
    #[error("invalid bit string: {0}")]
    InvalidBits(String),
}
