//! Table data model types
//!
//! A `Table` is an immutable snapshot of the document's cells. Every edit
//! produces a new `Table`; old snapshots stay valid for undo/redo and can be
//! shared across threads.

use std::sync::Arc;

/// Supported CSV delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Get the byte for this delimiter (all supported delimiters are ASCII)
    pub fn byte(self) -> u8 {
        self.char() as u8
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }

    /// Parse a user-supplied delimiter name or character
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "," | "comma" | "csv" => Some(Delimiter::Comma),
            "\t" | "\\t" | "tab" | "tsv" => Some(Delimiter::Tab),
            "|" | "pipe" | "psv" => Some(Delimiter::Pipe),
            ";" | "semicolon" => Some(Delimiter::Semicolon),
            _ => None,
        }
    }
}

/// Line terminator used when writing the table back to text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

/// Immutable two-dimensional array of cell strings.
///
/// Cloning is an `Arc` bump. Rows may be ragged; a missing trailing cell
/// reads as the empty string.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Arc<Vec<Vec<String>>>,
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows) || self.rows == other.rows
    }
}

impl Eq for Table {}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from parsed rows
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Convenience constructor for literals and tests
    pub fn from_strs<R, S>(rows: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        Self::from_rows(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|s| s.as_ref().to_string()).collect())
                .collect(),
        )
    }

    /// True if both tables share the same snapshot allocation
    pub fn ptr_eq(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }

    /// Get number of rows (header included)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in the table
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Number of cells in row 0
    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get cell value at position, empty for anything out of range
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Get an entire row (as stored, possibly short)
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// First row index holding data, given the header mode
    pub fn data_start(&self, ignore_header_row: bool) -> usize {
        if ignore_header_row || self.rows.is_empty() {
            0
        } else {
            1
        }
    }

    /// Number of data rows, given the header mode
    pub fn data_row_count(&self, ignore_header_row: bool) -> usize {
        self.rows.len() - self.data_start(ignore_header_row)
    }

    /// Copy of the rows, for building the next snapshot
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows.as_ref().clone()
    }
}
