//! Row and column views derived from a Table
//!
//! The grid never sees the raw 2D array. It sees `ColumnView`s (one reserved
//! index column followed by one column per table column) and `RowView`s keyed
//! by positional `col{i}` identifiers. Both are rebuilt from scratch whenever
//! the Table or the header mode changes.

use std::collections::BTreeMap;

use serde::Serialize;

use super::model::Table;

/// Key of the reserved row-number column
pub const INDEX_COLUMN_KEY: &str = "__index";

/// Display name of the reserved row-number column
pub const INDEX_COLUMN_NAME: &str = "#";

/// Width of the reserved row-number column
pub const INDEX_COLUMN_WIDTH: u32 = 50;

/// Synthetic key for the column at `index`
pub fn column_key(index: usize) -> String {
    format!("col{}", index)
}

/// Inverse of `column_key`; `None` for reserved or foreign keys
pub fn parse_column_key(key: &str) -> Option<usize> {
    let digits = key.strip_prefix("col")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Column descriptor handed to the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub key: String,
    pub name: String,
    pub editable: bool,
    pub sortable: bool,
    pub draggable: bool,
    pub width: u32,
    /// Row-number column, not backed by table data
    pub reserved: bool,
}

impl ColumnView {
    fn index_column() -> Self {
        Self {
            key: INDEX_COLUMN_KEY.to_string(),
            name: INDEX_COLUMN_NAME.to_string(),
            editable: false,
            sortable: false,
            draggable: false,
            width: INDEX_COLUMN_WIDTH,
            reserved: true,
        }
    }

    fn data_column(index: usize, name: String, width: u32) -> Self {
        Self {
            key: column_key(index),
            name,
            editable: true,
            sortable: true,
            draggable: true,
            width,
            reserved: false,
        }
    }

    /// Table column this view maps to (None for the reserved column)
    pub fn data_index(&self) -> Option<usize> {
        if self.reserved {
            None
        } else {
            parse_column_key(&self.key)
        }
    }
}

/// One data row as the grid sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    /// Data position at projection time; the grid's row key
    pub id: usize,
    /// Visible position
    pub index: usize,
    #[serde(flatten)]
    pub cells: BTreeMap<String, String>,
}

impl RowView {
    /// Build a row view from positional cells
    pub fn from_cells(id: usize, cells: &[String]) -> Self {
        Self {
            id,
            index: id,
            cells: cells
                .iter()
                .enumerate()
                .map(|(i, value)| (column_key(i), value.clone()))
                .collect(),
        }
    }

    /// Cell value for a column key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(|s| s.as_str())
    }

    /// Cell value for a column key, absent cells read as empty
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Flatten back to a positional row of `width` cells
    pub fn to_cells(&self, width: usize) -> Vec<String> {
        (0..width)
            .map(|i| self.value(&column_key(i)).to_string())
            .collect()
    }
}

/// Derive the grid's column descriptors.
///
/// The reserved index column always comes first. With `ignore_header_row`
/// there is no header to take names from, so names are empty.
pub fn project_columns(table: &Table, ignore_header_row: bool, width: u32) -> Vec<ColumnView> {
    if table.is_empty() {
        return Vec::new();
    }

    let mut columns = Vec::with_capacity(table.column_count() + 1);
    columns.push(ColumnView::index_column());

    for i in 0..table.column_count() {
        let name = if ignore_header_row {
            String::new()
        } else {
            table.get(0, i).to_string()
        };
        columns.push(ColumnView::data_column(i, name, width));
    }

    columns
}

/// Derive one `RowView` per data row
pub fn project_rows(table: &Table, ignore_header_row: bool) -> Vec<RowView> {
    let start = table.data_start(ignore_header_row);

    table
        .rows()
        .skip(start)
        .enumerate()
        .map(|(id, cells)| RowView::from_cells(id, cells))
        .collect()
}
