//! Structural edits on a Table
//!
//! Every edit takes `&self` and returns a fresh `Table`. Row indices are data
//! positions: with a header row, data position 0 is table row 1. Edits that
//! change nothing hand back a clone sharing the same snapshot, so callers can
//! skip recording them with `Table::ptr_eq`.

use super::model::Table;
use super::projection::RowView;

/// Header text given to a newly inserted column
pub const DEFAULT_COLUMN_NAME: &str = "New Column";

/// Settings that affect how edits are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Treat row 0 as data instead of column names
    pub ignore_header_row: bool,
    /// Header text for inserted columns
    pub new_column_name: String,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            ignore_header_row: false,
            new_column_name: DEFAULT_COLUMN_NAME.to_string(),
        }
    }
}

/// An edit requested by the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEdit {
    /// Insert an empty row before data row `index` (appends past the end)
    InsertRow { index: usize },
    DeleteRow { index: usize },
    /// Replace every data row with the given views, in order
    UpdateRows(Vec<RowView>),
    /// Insert a column before `index` (appends past the end)
    InsertColumn { index: usize },
    DeleteColumn { index: usize },
    RenameColumn { index: usize, name: String },
    SwapRows { from: usize, to: usize },
    SwapColumns { from: usize, to: usize },
    UpdateCell { row: usize, col: usize, value: String },
}

impl TableEdit {
    /// Short label for logs and status text
    pub fn label(&self) -> &'static str {
        match self {
            TableEdit::InsertRow { .. } => "insert row",
            TableEdit::DeleteRow { .. } => "delete row",
            TableEdit::UpdateRows(_) => "update rows",
            TableEdit::InsertColumn { .. } => "insert column",
            TableEdit::DeleteColumn { .. } => "delete column",
            TableEdit::RenameColumn { .. } => "rename column",
            TableEdit::SwapRows { .. } => "move row",
            TableEdit::SwapColumns { .. } => "move column",
            TableEdit::UpdateCell { .. } => "edit cell",
        }
    }
}

/// Reason an edit was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Data row index past the last data row
    RowOutOfRange { index: usize, len: usize },
    /// Column index past the widest row
    ColumnOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::RowOutOfRange { index, len } => {
                write!(f, "Row {} is out of range ({} data rows)", index, len)
            }
            EditError::ColumnOutOfRange { index, len } => {
                write!(f, "Column {} is out of range ({} columns)", index, len)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Pad a row with empty cells so that `len` cells exist
fn pad_to(row: &mut Vec<String>, len: usize) {
    if row.len() < len {
        row.resize(len, String::new());
    }
}

impl Table {
    /// Apply any edit
    pub fn apply(&self, edit: &TableEdit, options: &EditOptions) -> Result<Table, EditError> {
        let ignore = options.ignore_header_row;
        match edit {
            TableEdit::InsertRow { index } => Ok(self.insert_row(*index, ignore)),
            TableEdit::DeleteRow { index } => self.delete_row(*index, ignore),
            TableEdit::UpdateRows(rows) => Ok(self.update_rows(rows, ignore)),
            TableEdit::InsertColumn { index } => {
                Ok(self.insert_column(*index, &options.new_column_name, ignore))
            }
            TableEdit::DeleteColumn { index } => self.delete_column(*index),
            TableEdit::RenameColumn { index, name } => self.rename_column(*index, name, ignore),
            TableEdit::SwapRows { from, to } => self.swap_rows(*from, *to, ignore),
            TableEdit::SwapColumns { from, to } => self.swap_columns(*from, *to),
            TableEdit::UpdateCell { row, col, value } => {
                self.update_cell(*row, *col, value, ignore)
            }
        }
    }

    fn check_data_row(&self, index: usize, ignore_header_row: bool) -> Result<usize, EditError> {
        let len = self.data_row_count(ignore_header_row);
        if index < len {
            Ok(self.data_start(ignore_header_row) + index)
        } else {
            Err(EditError::RowOutOfRange { index, len })
        }
    }

    fn check_column(&self, index: usize) -> Result<(), EditError> {
        let len = self.column_count();
        if index < len {
            Ok(())
        } else {
            Err(EditError::ColumnOutOfRange { index, len })
        }
    }

    /// Insert a row of empty cells before data row `index`.
    ///
    /// Indices at or past the data row count append. The header row never
    /// moves. An empty table with a header gets a blank header row too, so
    /// the inserted row shows up as data.
    pub fn insert_row(&self, index: usize, ignore_header_row: bool) -> Table {
        let start = self.data_start(ignore_header_row);
        let at = start + index.min(self.data_row_count(ignore_header_row));
        let width = self.column_count().max(1);

        let mut rows = self.to_rows();
        if rows.is_empty() && !ignore_header_row {
            rows.push(vec![String::new(); width]);
        }
        rows.insert(at, vec![String::new(); width]);
        Table::from_rows(rows)
    }

    /// Remove data row `index`
    pub fn delete_row(&self, index: usize, ignore_header_row: bool) -> Result<Table, EditError> {
        let at = self.check_data_row(index, ignore_header_row)?;

        let mut rows = self.to_rows();
        rows.remove(at);
        Ok(Table::from_rows(rows))
    }

    /// Replace all data rows from row views.
    ///
    /// Each view is flattened to `column_count()` cells; keys a view lacks
    /// become empty strings.
    pub fn update_rows(&self, views: &[RowView], ignore_header_row: bool) -> Table {
        let start = self.data_start(ignore_header_row);
        let width = self.column_count();

        let mut rows: Vec<Vec<String>> = self.rows().take(start).map(|r| r.to_vec()).collect();
        rows.extend(views.iter().map(|view| view.to_cells(width)));
        Table::from_rows(rows)
    }

    /// Insert a column before `index` in every row.
    ///
    /// The header cell gets `name`; data cells are empty. Indices past the
    /// last column append. An empty table has no rows to extend and is
    /// returned unchanged.
    pub fn insert_column(&self, index: usize, name: &str, ignore_header_row: bool) -> Table {
        if self.is_empty() {
            return self.clone();
        }

        let at = index.min(self.column_count());
        let mut rows = self.to_rows();

        for (row_idx, row) in rows.iter_mut().enumerate() {
            pad_to(row, at);
            let value = if row_idx == 0 && !ignore_header_row {
                name.to_string()
            } else {
                String::new()
            };
            row.insert(at, value);
        }

        Table::from_rows(rows)
    }

    /// Remove column `index` from every row
    pub fn delete_column(&self, index: usize) -> Result<Table, EditError> {
        self.check_column(index)?;

        let mut rows = self.to_rows();
        for row in rows.iter_mut() {
            if index < row.len() {
                row.remove(index);
            }
        }
        Ok(Table::from_rows(rows))
    }

    /// Rename the header cell of column `index`.
    ///
    /// Without a header row there is nothing to rename and the table is
    /// returned unchanged.
    pub fn rename_column(
        &self,
        index: usize,
        name: &str,
        ignore_header_row: bool,
    ) -> Result<Table, EditError> {
        if ignore_header_row {
            return Ok(self.clone());
        }
        self.check_column(index)?;
        if self.get(0, index) == name {
            return Ok(self.clone());
        }

        let mut rows = self.to_rows();
        pad_to(&mut rows[0], index + 1);
        rows[0][index] = name.to_string();
        Ok(Table::from_rows(rows))
    }

    /// Exchange two data rows by position
    pub fn swap_rows(
        &self,
        a: usize,
        b: usize,
        ignore_header_row: bool,
    ) -> Result<Table, EditError> {
        let a = self.check_data_row(a, ignore_header_row)?;
        let b = self.check_data_row(b, ignore_header_row)?;
        if a == b {
            return Ok(self.clone());
        }

        let mut rows = self.to_rows();
        rows.swap(a, b);
        Ok(Table::from_rows(rows))
    }

    /// Exchange two columns by position in every row
    pub fn swap_columns(&self, a: usize, b: usize) -> Result<Table, EditError> {
        self.check_column(a)?;
        self.check_column(b)?;
        if a == b {
            return Ok(self.clone());
        }

        let needed = a.max(b) + 1;
        let mut rows = self.to_rows();
        for row in rows.iter_mut() {
            pad_to(row, needed);
            row.swap(a, b);
        }
        Ok(Table::from_rows(rows))
    }

    /// Set a single cell in data row `row`
    pub fn update_cell(
        &self,
        row: usize,
        col: usize,
        value: &str,
        ignore_header_row: bool,
    ) -> Result<Table, EditError> {
        let at = self.check_data_row(row, ignore_header_row)?;
        self.check_column(col)?;
        if self.get(at, col) == value {
            return Ok(self.clone());
        }

        let mut rows = self.to_rows();
        pad_to(&mut rows[at], col + 1);
        rows[at][col] = value.to_string();
        Ok(Table::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::projection::project_rows;

    fn people() -> Table {
        Table::from_strs(&[
            vec!["Name", "Age"],
            vec!["Alice", "30"],
            vec!["Bob", "25"],
        ])
    }

    #[test]
    fn test_insert_row_before_data_index() {
        let table = people().insert_row(1, false);

        assert_eq!(
            table,
            Table::from_strs(&[
                vec!["Name", "Age"],
                vec!["Alice", "30"],
                vec!["", ""],
                vec!["Bob", "25"],
            ])
        );
    }

    #[test]
    fn test_insert_row_at_zero_keeps_header() {
        let table = people().insert_row(0, false);
        assert_eq!(table.get(0, 0), "Name");
        assert_eq!(table.get(1, 0), "");
        assert_eq!(table.get(2, 0), "Alice");
    }

    #[test]
    fn test_insert_row_past_end_appends() {
        let table = people().insert_row(99, false);
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.row(3), Some(&["".to_string(), "".to_string()][..]));
    }

    #[test]
    fn test_insert_row_ignore_header() {
        let table = people().insert_row(0, true);
        assert_eq!(table.get(0, 0), "");
        assert_eq!(table.get(1, 0), "Name");
    }

    #[test]
    fn test_insert_row_into_empty_table() {
        let table = Table::new().insert_row(0, false);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.data_row_count(false), 1);

        let headerless = Table::new().insert_row(3, true);
        assert_eq!(headerless.row_count(), 1);
        assert_eq!(headerless.data_row_count(true), 1);
    }

    #[test]
    fn test_delete_row() {
        let table = people().delete_row(0, false).unwrap();
        assert_eq!(
            table,
            Table::from_strs(&[vec!["Name", "Age"], vec!["Bob", "25"]])
        );
    }

    #[test]
    fn test_delete_row_out_of_range() {
        assert_eq!(
            people().delete_row(2, false),
            Err(EditError::RowOutOfRange { index: 2, len: 2 })
        );
        assert!(people().delete_row(2, true).is_ok());
    }

    #[test]
    fn test_insert_then_delete_restores() {
        let original = people();
        for i in 0..=2 {
            let restored = original.insert_row(i, false).delete_row(i, false).unwrap();
            assert_eq!(restored, original);
        }
    }

    #[test]
    fn test_update_rows_fills_missing_keys() {
        let table = people();
        let mut rows = project_rows(&table, false);
        rows.reverse();
        rows[0].cells.remove("col1");

        let updated = table.update_rows(&rows, false);
        assert_eq!(
            updated,
            Table::from_strs(&[vec!["Name", "Age"], vec!["Bob", ""], vec!["Alice", "30"]])
        );
    }

    #[test]
    fn test_insert_column_with_header() {
        let table = people().insert_column(1, DEFAULT_COLUMN_NAME, false);

        assert_eq!(table.get(0, 1), DEFAULT_COLUMN_NAME);
        assert_eq!(table.get(1, 1), "");
        assert_eq!(table.get(1, 2), "30");
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_insert_column_ignore_header() {
        let table = people().insert_column(5, "X", true);
        assert_eq!(table.get(0, 2), "");
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_delete_column() {
        let table = people().delete_column(0).unwrap();
        assert_eq!(
            table,
            Table::from_strs(&[vec!["Age"], vec!["30"], vec!["25"]])
        );
        assert!(matches!(
            people().delete_column(2),
            Err(EditError::ColumnOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_rename_column() {
        let table = people().rename_column(1, "Years", false).unwrap();
        assert_eq!(table.get(0, 1), "Years");

        let original = people();
        let unchanged = original.rename_column(1, "Years", true).unwrap();
        assert!(unchanged.ptr_eq(&original));
    }

    #[test]
    fn test_swap_rows() {
        let table = people().swap_rows(0, 1, false).unwrap();
        assert_eq!(table.get(1, 0), "Bob");
        assert_eq!(table.get(2, 0), "Alice");
        assert_eq!(table.get(0, 0), "Name");
    }

    #[test]
    fn test_swap_columns() {
        let table = people().swap_columns(0, 1).unwrap();
        assert_eq!(
            table,
            Table::from_strs(&[vec!["Age", "Name"], vec!["30", "Alice"], vec!["25", "Bob"]])
        );
    }

    #[test]
    fn test_update_cell() {
        let table = people().update_cell(1, 1, "26", false).unwrap();
        assert_eq!(table.get(2, 1), "26");
        assert_eq!(people().get(2, 1), "25");
    }

    #[test]
    fn test_update_cell_same_value_is_noop() {
        let original = people();
        let same = original.update_cell(0, 0, "Alice", false).unwrap();
        assert!(same.ptr_eq(&original));
    }

    #[test]
    fn test_update_cell_pads_short_row() {
        let table = Table::from_strs(&[vec!["a", "b"], vec!["1"]]);
        let updated = table.update_cell(0, 1, "2", false).unwrap();
        assert_eq!(updated.row(1).map(|r| r.len()), Some(2));
        assert_eq!(updated.get(1, 1), "2");
    }

    #[test]
    fn test_apply_dispatches() {
        let options = EditOptions::default();
        let table = people()
            .apply(&TableEdit::InsertColumn { index: 2 }, &options)
            .unwrap();
        assert_eq!(table.get(0, 2), DEFAULT_COLUMN_NAME);
    }
}
