//! Error types for the editing engine

use framegen_model::ModelError;
use thiserror::Error;

/// Errors that abort an editing operation before anything is mutated
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Import payload could not be decoded
    #[error("malformed selection: {0}")]
    MalformedSelection(String),

    /// Label index does not belong to the frame at `row`
    #[error("invalid label reference: label {index} on row {row}")]
    InvalidLabelReference { row: usize, index: usize },

    /// Selection reference names a node that is not in the tree
    #[error("unresolved node: row {row} under parent {parent:?}")]
    UnresolvedNode {
        /// Row of the node under its parent
        row: usize,
        /// Parent row under the root, `None` for the root itself
        parent: Option<usize>,
    },

    /// Row index outside the collection
    #[error("row {row} out of range for {len} frames")]
    RowOutOfRange { row: usize, len: usize },

    /// Frame model error
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}
