//! Grid session state
//!
//! One `GridSession` per open document. It owns the current `Table`, its
//! undo history and every piece of view state (header mode, filters, sort,
//! search). The host text is the source of truth; the session parses it on
//! arrival and posts serialized text back after each edit.

use std::collections::VecDeque;

use crate::commands::Cmd;
use crate::config::EngineConfig;
use crate::filter::FilterState;
use crate::history::History;
use crate::search::SearchState;
use crate::sort::{sort_rows, SortDirection, SortState};
use crate::table::{
    detect_delimiter, detect_line_ending, project_columns, project_rows, CodecError, ColumnView,
    Delimiter, EditOptions, LineEnding, RowView, Table, TableEdit,
};

/// Posted payloads remembered for echo detection
const MAX_PENDING_POSTS: usize = 32;

/// Engine state for one open document
#[derive(Debug, Clone)]
pub struct GridSession {
    table: Table,
    /// Treat row 0 as data
    pub ignore_header_row: bool,
    pub delimiter: Delimiter,
    pub line_ending: LineEnding,
    history: History<Table>,
    pub filters: FilterState,
    pub sort: Option<SortState>,
    pub search: SearchState,
    /// Newest host revision applied so far
    host_revision: Option<u64>,
    /// Texts we posted that the host has not echoed back yet, oldest first
    pending_posts: VecDeque<String>,
    /// Bumped on every table change; memoization key for projections
    revision: u64,
    config: EngineConfig,
}

impl Default for GridSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GridSession {
    /// Empty session using the given settings
    pub fn new(config: EngineConfig) -> Self {
        Self {
            table: Table::new(),
            ignore_header_row: config.ignore_header_row,
            delimiter: Delimiter::Comma,
            line_ending: LineEnding::Lf,
            history: History::with_max_size(config.max_history_size),
            filters: FilterState::new(),
            sort: None,
            search: SearchState::new(),
            host_revision: None,
            pending_posts: VecDeque::new(),
            revision: 0,
            config,
        }
    }

    /// Open a document. Without an explicit delimiter one is detected.
    pub fn open(text: &str, delimiter: Option<Delimiter>, config: EngineConfig) -> Self {
        let mut session = Self::new(config);
        session.delimiter = delimiter.unwrap_or_else(|| detect_delimiter(text));
        session.load_text(text);
        session
    }

    /// Open a document from raw file bytes.
    ///
    /// Detection runs on a lossy decoding; bytes the codec rejects load as a
    /// single-column table instead of failing.
    pub fn open_bytes(bytes: &[u8], delimiter: Option<Delimiter>, config: EngineConfig) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let mut session = Self::new(config);
        session.delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&text));
        let table = Table::from_bytes(bytes, session.delimiter);
        session.load_table(table, detect_line_ending(&text));
        session
    }

    /// Replace the table with freshly parsed text, as if newly opened.
    ///
    /// Clears history and search; filters and sort survive since they are
    /// keyed by column position.
    pub fn load_text(&mut self, text: &str) {
        let table = Table::from_text(text, self.delimiter);
        self.load_table(table, detect_line_ending(text));
    }

    fn load_table(&mut self, table: Table, line_ending: LineEnding) {
        self.table = table;
        self.line_ending = line_ending;
        self.history.clear();
        self.pending_posts.clear();
        self.search.handle_close();
        self.revision += 1;

        tracing::debug!(
            rows = self.table.row_count(),
            columns = self.table.column_count(),
            delimiter = ?self.delimiter,
            "Loaded table"
        );
    }

    /// Apply whole-document text pushed by the host.
    ///
    /// Stale revisions are dropped. Text we posted earlier is an echo and
    /// changes nothing, even when later edits have been posted since. Text
    /// equal to the current table is ignored too. Anything else is an
    /// external change: it replaces the table and the previous table goes
    /// onto the undo stack.
    pub fn handle_host_update(&mut self, text: &str, revision: u64) -> Option<Cmd> {
        if let Some(applied) = self.host_revision {
            if revision <= applied {
                tracing::debug!(revision, applied, "Dropping stale host update");
                return None;
            }
        }
        self.host_revision = Some(revision);

        if let Some(pos) = self.pending_posts.iter().position(|posted| posted == text) {
            self.pending_posts.remove(pos);
            tracing::trace!(revision, "Host echoed an earlier post");
            return None;
        }

        let parsed = Table::from_text(text, self.delimiter);
        if parsed == self.table {
            tracing::trace!(revision, "Host update matches current table");
            return None;
        }

        self.table = self.history.set_and_push(parsed, self.table.clone());
        self.line_ending = detect_line_ending(text);
        self.pending_posts.clear();
        self.revision += 1;
        self.refresh_search();
        tracing::debug!(revision, "Applied external host change");
        Some(Cmd::Redraw)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn host_revision(&self) -> Option<u64> {
        self.host_revision
    }

    pub fn history(&self) -> &History<Table> {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn edit_options(&self) -> EditOptions {
        EditOptions {
            ignore_header_row: self.ignore_header_row,
            ..self.config.edit_options()
        }
    }

    /// Toggle header mode; a view change that leaves the table alone
    pub fn set_ignore_header_row(&mut self, ignore: bool) -> Option<Cmd> {
        if self.ignore_header_row == ignore {
            return None;
        }
        self.ignore_header_row = ignore;
        self.refresh_search();
        Some(Cmd::Redraw)
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<Cmd> {
        self.filters.set_filter(key, value);
        self.refresh_search();
        Some(Cmd::Redraw)
    }

    pub fn clear_filter(&mut self, key: &str) -> Option<Cmd> {
        self.filters.clear_filter(key);
        self.refresh_search();
        Some(Cmd::Redraw)
    }

    pub fn clear_filters(&mut self) -> Option<Cmd> {
        self.filters.clear_filters();
        self.refresh_search();
        Some(Cmd::Redraw)
    }

    /// Sort the view by a column; the table keeps its order
    pub fn sort_by(&mut self, key: impl Into<String>, direction: SortDirection) -> Option<Cmd> {
        self.sort = Some(SortState::new(key, direction));
        self.refresh_search();
        Some(Cmd::Redraw)
    }

    pub fn clear_sort(&mut self) -> Option<Cmd> {
        self.sort.take()?;
        self.refresh_search();
        Some(Cmd::Redraw)
    }

    /// Run a search over the visible rows
    pub fn run_search(&mut self, query: &str) -> Option<Cmd> {
        let rows = self.visible_rows();
        let columns = self.columns();
        self.search.handle_search(query, &rows, &columns)
    }

    /// Recompute match positions after the visible rows changed
    fn refresh_search(&mut self) {
        if self.search.query.is_empty() {
            return;
        }
        let rows = self.visible_rows();
        let columns = self.columns();
        self.search.refresh(&rows, &columns);
    }

    /// All data rows in table order
    pub fn rows(&self) -> Vec<RowView> {
        project_rows(&self.table, self.ignore_header_row)
    }

    /// Grid columns, reserved index column first
    pub fn columns(&self) -> Vec<ColumnView> {
        project_columns(&self.table, self.ignore_header_row, self.config.column_width)
    }

    /// Rows as displayed: filtered, then sorted, with `index` set to the
    /// visible position
    pub fn visible_rows(&self) -> Vec<RowView> {
        let rows = self.rows();
        let filtered = self.filters.filtered_rows(&rows);
        let mut visible = sort_rows(&filtered, self.sort.as_ref()).into_owned();
        for (index, row) in visible.iter_mut().enumerate() {
            row.index = index;
        }
        visible
    }

    /// Validate and apply an edit, recording the previous table for undo
    pub fn apply_edit(&mut self, edit: &TableEdit) -> Option<Cmd> {
        let next = match self.table.apply(edit, &self.edit_options()) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", edit.label(), e);
                return None;
            }
        };

        if next == self.table {
            tracing::debug!("{} left the table unchanged", edit.label());
            return None;
        }

        self.table = self.history.set_and_push(next, self.table.clone());
        self.revision += 1;
        self.refresh_search();
        tracing::debug!(revision = self.revision, "Applied {}", edit.label());
        self.post_text()
    }

    pub fn undo(&mut self) -> Option<Cmd> {
        let previous = self.history.undo(self.table.clone())?;
        self.table = previous;
        self.revision += 1;
        self.refresh_search();
        self.post_text()
    }

    pub fn redo(&mut self) -> Option<Cmd> {
        let next = self.history.redo(self.table.clone())?;
        self.table = next;
        self.revision += 1;
        self.refresh_search();
        self.post_text()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Write the current sort order into the table as one undoable edit.
    ///
    /// Every data row is reordered, including rows a filter hides. The sort
    /// state is cleared since the table now carries the order itself.
    pub fn commit_sort(&mut self) -> Option<Cmd> {
        let sort = self.sort.take()?;
        let rows = self.rows();
        let sorted = sort_rows(&rows, Some(&sort)).into_owned();

        let posted = self.apply_edit(&TableEdit::UpdateRows(sorted));
        // An already sorted table posts nothing, but the view order changed
        if posted.is_none() {
            self.refresh_search();
        }
        Some(Cmd::batch(vec![posted.unwrap_or_default(), Cmd::Redraw]))
    }

    /// Serialize the current table
    pub fn to_text(&self) -> Result<String, CodecError> {
        self.table.to_text(self.delimiter, self.line_ending)
    }

    /// Text of the current table for the host, tagged with our revision.
    /// Remembered so the host echoing it back is not taken for a change.
    fn post_text(&mut self) -> Option<Cmd> {
        match self.to_text() {
            Ok(text) => {
                if self.pending_posts.len() == MAX_PENDING_POSTS {
                    self.pending_posts.pop_front();
                }
                self.pending_posts.push_back(text.clone());
                Some(Cmd::PostText {
                    text,
                    revision: self.revision,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to serialize table: {}", e);
                None
            }
        }
    }

    /// Save request: hand the serialized document to the host
    pub fn save(&self) -> Option<Cmd> {
        match self.to_text() {
            Ok(text) => Some(Cmd::SaveDocument { text }),
            Err(e) => {
                tracing::warn!("Failed to serialize table for save: {}", e);
                None
            }
        }
    }
}
