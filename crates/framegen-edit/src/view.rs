//! View-facing capabilities
//!
//! The grid widget itself lives outside this crate. This module describes
//! what the widget may do with cells and exposes the sentinel-based lookup
//! it expects.

use crate::collection::FrameCollection;

/// Sentinel returned when no label is under the cursor
pub const NO_SELECTION: isize = -1;

/// What the view layer may do with a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlags {
    pub enabled: bool,
    pub selectable: bool,
    pub editable: bool,
    /// Cell can start a drag
    pub drag_enabled: bool,
    /// Cell accepts drops
    pub drop_enabled: bool,
}

impl CellFlags {
    /// Every capability set
    pub const ALL: Self = Self {
        enabled: true,
        selectable: true,
        editable: true,
        drag_enabled: true,
        drop_enabled: true,
    };

    /// Only `enabled` set
    pub const ENABLED_ONLY: Self = Self {
        enabled: true,
        selectable: false,
        editable: false,
        drag_enabled: false,
        drop_enabled: false,
    };
}

/// Drop actions accepted by the frame table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropActions {
    pub copy: bool,
    pub moving: bool,
}

/// The frame table accepts copy and move drops
pub const SUPPORTED_DROP_ACTIONS: DropActions = DropActions {
    copy: true,
    moving: true,
};

/// Flags for a cell; every valid cell is fully interactive
pub fn cell_flags(valid: bool) -> CellFlags {
    if valid {
        CellFlags::ALL
    } else {
        CellFlags::ENABLED_ONLY
    }
}

impl FrameCollection {
    /// Whether `(row, column)` addresses an existing cell in the current view
    pub fn is_valid_cell(&self, row: usize, column: usize) -> bool {
        self.frame(row)
            .is_some_and(|frame| column < frame.column_count(self.view_mode(), self.decode()))
    }

    /// Flags for `(row, column)`
    pub fn flags(&self, row: usize, column: usize) -> CellFlags {
        cell_flags(self.is_valid_cell(row, column))
    }

    /// Label index under `(row, column)`, or [`NO_SELECTION`]
    pub fn get_selected_label_index(&self, row: usize, column: usize) -> isize {
        self.selected_label_index(row, column)
            .and_then(|index| isize::try_from(index).ok())
            .unwrap_or(NO_SELECTION)
    }
}
