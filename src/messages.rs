//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types, whether they come
//! from the host editor or from the grid UI.

use crate::sort::SortDirection;
use crate::table::TableEdit;

/// Grid engine messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMsg {
    // === Host Document ===
    /// Whole-document text from the host, tagged with the host's revision
    HostUpdate { text: String, revision: u64 },
    /// Explicit save request
    Save,

    // === Editing ===
    /// Structural or cell edit from the grid
    Edit(TableEdit),
    Undo,
    Redo,
    ClearHistory,

    // === View ===
    /// Treat row 0 as data (true) or as column names (false)
    SetIgnoreHeaderRow(bool),
    SetFilter { key: String, value: String },
    ClearFilter(String),
    ClearFilters,
    SortBy { key: String, direction: SortDirection },
    ClearSort,
    /// Write the current sorted order into the table (undoable)
    CommitSort,

    // === Search ===
    Search(String),
    SearchNext,
    SearchPrevious,
    SearchClose,
}

// Convenience constructors for common messages
impl GridMsg {
    /// Create a cell edit message
    pub fn update_cell(row: usize, col: usize, value: impl Into<String>) -> Self {
        GridMsg::Edit(TableEdit::UpdateCell {
            row,
            col,
            value: value.into(),
        })
    }

    /// Create a host update message
    pub fn host_update(text: impl Into<String>, revision: u64) -> Self {
        GridMsg::HostUpdate {
            text: text.into(),
            revision,
        }
    }

    /// Create a filter message
    pub fn set_filter(key: impl Into<String>, value: impl Into<String>) -> Self {
        GridMsg::SetFilter {
            key: key.into(),
            value: value.into(),
        }
    }
}
