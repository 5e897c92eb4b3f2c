//! Snapshot history (undo/redo) for table edits.
//!
//! Stores whole prior values rather than inverse operations. With `Table`
//! being an `Arc` snapshot, each entry costs one pointer.

use std::collections::VecDeque;

/// Default number of undoable steps
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Linear undo/redo history over snapshots of `T`.
///
/// The caller owns the current value and passes it in; every method that
/// changes state returns the value the caller should apply next.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    max_size: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    /// Create a new history with default max size
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_HISTORY)
    }

    /// Create a new history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record `current` as undoable and hand back `next` for the caller to apply.
    ///
    /// Clears the redo stack. Evicts the oldest entry once `max_size` is
    /// exceeded.
    pub fn set_and_push(&mut self, next: T, current: T) -> T {
        self.redo_stack.clear();
        self.undo_stack.push_back(current);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }

        next
    }

    /// Step back: returns the snapshot to apply, or None if nothing to undo
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward: returns the snapshot to apply, or None if nothing to redo
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get the number of snapshots in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of snapshots in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the bound, evicting the oldest entries if needed
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }
}
