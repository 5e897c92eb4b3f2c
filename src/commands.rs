//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host or grid must perform after an
//! update. The engine itself never performs I/O.

/// Side effect requested by an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// View state changed (filters, sort, header mode); re-render the grid
    Redraw,
    /// Replace the host document with this text
    PostText { text: String, revision: u64 },
    /// Ask the host to persist the document with this text
    SaveDocument { text: String },
    /// Select a cell and scroll it into view.
    /// `row_index` is a position in the visible rows, `column_index` a grid
    /// column (the reserved index column is 0).
    ScrollToCell { row_index: usize, column_index: usize },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine commands, flattening `None` and single-element batches
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this is the None command
    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// The text this command sends to the host, if any
    pub fn outgoing_text(&self) -> Option<&str> {
        match self {
            Cmd::PostText { text, .. } | Cmd::SaveDocument { text } => Some(text),
            Cmd::Batch(cmds) => cmds.iter().find_map(|c| c.outgoing_text()),
            _ => None,
        }
    }
}
