//! Frame Collection Editing Engine
//!
//! This crate provides the editable model behind a protocol generator
//! table: an ordered collection of frames that is changed only through
//! reversible commands.
//!
//! # Architecture
//!
//! - [`FrameCollection`] owns the frames, the view settings and its own
//!   [`CommandLog`]; every structural edit goes through an [`EditCommand`]
//! - [`merge`] turns drag-and-drop payloads into an ordered import list
//!   against any [`SelectionTree`]
//! - [`hints`] derives bold/colored cells from label and fuzzing state
//! - [`view`] holds the capability flags and sentinel lookups the grid
//!   widget consumes
//!
//! Edits are synchronous and single-threaded. A failed edit leaves both the
//! frames and the history untouched.
//!
//! # Example
//!
//! ```rust
//! use framegen_edit::{FrameCollection, ProtocolTree, SelectionTree};
//! use framegen_model::Frame;
//!
//! let mut tree = ProtocolTree::new();
//! let root = tree.root();
//! let capture = vec![Frame::from_bit_str("10101010").unwrap()];
//! tree.add_leaf(root, "capture", capture).unwrap();
//!
//! let mut frames = FrameCollection::new();
//! frames.import("0,0,-1/", &tree, None).unwrap();
//! frames.delete_range(0, 0, 0, 3).unwrap();
//! assert_eq!(frames.frame(0).unwrap().to_bit_string(), "1010");
//!
//! frames.undo();
//! assert_eq!(frames.frame(0).unwrap().to_bit_string(), "10101010");
//! ```

pub mod collection;
pub mod command;
pub mod error;
pub mod hints;
pub mod history;
pub mod merge;
pub mod view;

pub use collection::{EditorConfig, FrameCollection};
pub use command::EditCommand;
pub use error::EditError;
pub use hints::{compute_hints, RenderHints, Rgb, FUZZING_COLOR};
pub use history::{CommandLog, DEFAULT_HISTORY_DEPTH};
pub use merge::{
    merge_selection, parse_payload, NodeId, ProtocolTree, SelectionRef, SelectionTree,
};
pub use view::{cell_flags, CellFlags, DropActions, NO_SELECTION, SUPPORTED_DROP_ACTIONS};
