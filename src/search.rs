//! Cyclic cell search over the visible rows
//!
//! A search collects every cell whose value contains the query
//! (case-insensitive), ordered row-major. Next/previous move a cursor through
//! that list and wrap at either end.

use crate::commands::Cmd;
use crate::table::{ColumnView, RowView};

/// One matching cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPosition {
    /// Position in the rows the search ran against
    pub row_index: usize,
    /// Grid column index (the reserved index column is 0)
    pub column_index: usize,
    pub column_key: String,
}

/// State for the grid search bar
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Last non-blank query
    pub query: String,
    matches: Vec<MatchPosition>,
    current: Option<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a new search.
    ///
    /// A blank query is ignored and the previous matches stay. Otherwise the
    /// cursor moves to the first match, if any.
    pub fn handle_search(
        &mut self,
        query: &str,
        rows: &[RowView],
        columns: &[ColumnView],
    ) -> Option<Cmd> {
        if query.trim().is_empty() {
            return None;
        }

        self.query = query.to_string();
        self.matches = collect_matches(query, rows, columns);

        tracing::debug!("Search {:?}: {} matches", query, self.matches.len());

        if self.matches.is_empty() {
            self.current = None;
            return None;
        }

        self.current = Some(0);
        self.scroll_to_current()
    }

    /// Re-run the active query against new rows.
    ///
    /// Called whenever the table or the view changes, since match positions
    /// refer to visible rows. The cursor keeps its place, clamped to the new
    /// match count. Without an active query this does nothing.
    pub fn refresh(&mut self, rows: &[RowView], columns: &[ColumnView]) {
        if self.query.is_empty() {
            return;
        }

        self.matches = collect_matches(&self.query, rows, columns);
        self.current = match self.matches.len() {
            0 => None,
            len => Some(self.current.unwrap_or(0).min(len - 1)),
        };
        tracing::trace!("Refreshed search {:?}: {} matches", self.query, self.matches.len());
    }

    /// Advance to the next match, wrapping to the first
    pub fn handle_next_search(&mut self) -> Option<Cmd> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }

        let next = match self.current {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.current = Some(next);
        self.scroll_to_current()
    }

    /// Step back to the previous match, wrapping to the last
    pub fn handle_previous_search(&mut self) -> Option<Cmd> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }

        let prev = match self.current {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.current = Some(prev);
        self.scroll_to_current()
    }

    /// Close the search bar
    pub fn handle_close(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current = None;
    }

    fn scroll_to_current(&self) -> Option<Cmd> {
        self.current_cell().map(|pos| Cmd::ScrollToCell {
            row_index: pos.row_index,
            column_index: pos.column_index,
        })
    }

    /// Is the cell at (row_index, column_key) one of the matches?
    pub fn is_matched(&self, row_index: usize, column_key: &str) -> bool {
        self.matches
            .iter()
            .any(|m| m.row_index == row_index && m.column_key == column_key)
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Cursor position within the matches
    pub fn current_match_index(&self) -> Option<usize> {
        self.current
    }

    /// The match under the cursor
    pub fn current_cell(&self) -> Option<&MatchPosition> {
        self.current.and_then(|i| self.matches.get(i))
    }

    pub fn matches(&self) -> &[MatchPosition] {
        &self.matches
    }

    /// "2 of 5" style status text; empty without an active search
    pub fn status_text(&self) -> String {
        match self.current {
            Some(i) => format!("{} of {}", i + 1, self.matches.len()),
            None if !self.query.is_empty() => "No results".to_string(),
            None => String::new(),
        }
    }
}

/// Row-major case-insensitive matches, skipping reserved columns
fn collect_matches(query: &str, rows: &[RowView], columns: &[ColumnView]) -> Vec<MatchPosition> {
    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .flat_map(|(row_index, row)| {
            let needle = needle.as_str();
            columns
                .iter()
                .enumerate()
                .filter(|(_, column)| !column.reserved)
                .filter_map(move |(column_index, column)| {
                    let value = row.get(&column.key)?;
                    value.to_lowercase().contains(needle).then(|| MatchPosition {
                        row_index,
                        column_index,
                        column_key: column.key.clone(),
                    })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{project_columns, project_rows, Table};

    fn grid() -> (Vec<RowView>, Vec<ColumnView>) {
        let table = Table::from_strs(&[
            vec!["Name", "Note"],
            vec!["Alice", "likes apples"],
            vec!["Bob", "none"],
            vec!["Apple Co", "vendor"],
        ]);
        (project_rows(&table, false), project_columns(&table, false, 150))
    }

    #[test]
    fn test_search_row_major_order() {
        let (rows, columns) = grid();
        let mut search = SearchState::new();

        let cmd = search.handle_search("APPLE", &rows, &columns);
        assert_eq!(
            cmd,
            Some(Cmd::ScrollToCell {
                row_index: 0,
                column_index: 2
            })
        );

        let positions: Vec<(usize, usize)> = search
            .matches()
            .iter()
            .map(|m| (m.row_index, m.column_index))
            .collect();
        assert_eq!(positions, vec![(0, 2), (2, 1)]);
        assert_eq!(search.current_match_index(), Some(0));
    }

    #[test]
    fn test_search_cycles_forward_and_back() {
        let table = Table::from_strs(&[vec!["k"], vec!["x1"], vec!["x2"], vec!["x3"]]);
        let rows = project_rows(&table, false);
        let columns = project_columns(&table, false, 150);
        let mut search = SearchState::new();

        search.handle_search("x", &rows, &columns);
        assert_eq!(search.match_count(), 3);

        search.handle_next_search();
        search.handle_next_search();
        assert_eq!(search.current_match_index(), Some(2));
        search.handle_next_search();
        assert_eq!(search.current_match_index(), Some(0));

        let cmd = search.handle_previous_search();
        assert_eq!(search.current_match_index(), Some(2));
        assert_eq!(
            cmd,
            Some(Cmd::ScrollToCell {
                row_index: 2,
                column_index: 1
            })
        );
    }

    #[test]
    fn test_blank_query_keeps_matches() {
        let (rows, columns) = grid();
        let mut search = SearchState::new();
        search.handle_search("bob", &rows, &columns);

        assert_eq!(search.handle_search("   ", &rows, &columns), None);
        assert_eq!(search.match_count(), 1);
        assert_eq!(search.query, "bob");
    }

    #[test]
    fn test_reserved_column_skipped() {
        let (rows, columns) = grid();
        let mut search = SearchState::new();

        // Reserved column key never appears in row cells, and "#" is not data
        search.handle_search("#", &rows, &columns);
        assert_eq!(search.match_count(), 0);
        assert!(search.matches().iter().all(|m| m.column_index > 0));
    }

    #[test]
    fn test_no_matches_is_noop_for_navigation() {
        let (rows, columns) = grid();
        let mut search = SearchState::new();

        assert_eq!(search.handle_search("zzz", &rows, &columns), None);
        assert_eq!(search.handle_next_search(), None);
        assert_eq!(search.handle_previous_search(), None);
        assert_eq!(search.current_cell(), None);
        assert_eq!(search.status_text(), "No results");
    }

    #[test]
    fn test_close_clears() {
        let (rows, columns) = grid();
        let mut search = SearchState::new();
        search.handle_search("a", &rows, &columns);
        assert!(search.match_count() > 0);
        assert!(search.is_matched(0, "col0"));

        search.handle_close();
        assert_eq!(search.match_count(), 0);
        assert_eq!(search.current_match_index(), None);
        assert!(!search.is_matched(0, "col0"));
        assert_eq!(search.status_text(), "");
    }

    #[test]
    fn test_refresh_clamps_cursor() {
        let table = Table::from_strs(&[vec!["k"], vec!["x1"], vec!["x2"], vec!["x3"]]);
        let columns = project_columns(&table, false, 150);
        let mut search = SearchState::new();
        search.handle_search("x", &project_rows(&table, false), &columns);
        search.handle_next_search();
        search.handle_next_search();
        assert_eq!(search.current_match_index(), Some(2));

        let shrunk = Table::from_strs(&[vec!["k"], vec!["x1"], vec!["y"]]);
        search.refresh(&project_rows(&shrunk, false), &columns);
        assert_eq!(search.match_count(), 1);
        assert_eq!(search.current_match_index(), Some(0));
        assert!(!search.is_matched(2, "col0"));

        let none = Table::from_strs(&[vec!["k"], vec!["y"]]);
        search.refresh(&project_rows(&none, false), &columns);
        assert_eq!(search.current_cell(), None);
        assert_eq!(search.status_text(), "No results");
    }

    #[test]
    fn test_refresh_without_query_is_noop() {
        let (rows, columns) = grid();
        let mut search = SearchState::new();
        search.refresh(&rows, &columns);
        assert_eq!(search.match_count(), 0);
        assert_eq!(search.status_text(), "");
    }
}
