//! Tabular data engine
//!
//! Owns the canonical cell array and everything derived from it:
//!
//! ```text
//! text ──parse_csv──▶ Table ──project_rows/project_columns──▶ RowView / ColumnView
//!   ▲                   │
//!   └────write_csv──────┴──apply(TableEdit)──▶ Table (next snapshot)
//! ```

mod model;
mod mutation;
mod parser;
mod projection;

pub use model::{Delimiter, LineEnding, Table};
pub use mutation::{EditError, EditOptions, TableEdit, DEFAULT_COLUMN_NAME};
pub use parser::{
    degenerate_table, detect_delimiter, detect_line_ending, parse_csv, parse_csv_bytes, write_csv,
    CodecError,
};
pub use projection::{
    column_key, parse_column_key, project_columns, project_rows, ColumnView, RowView,
    INDEX_COLUMN_KEY, INDEX_COLUMN_NAME, INDEX_COLUMN_WIDTH,
};

impl Table {
    /// Parse document text. UTF-8 text always parses, ragged rows and
    /// unbalanced quotes included, so this cannot fail.
    pub fn from_text(content: &str, delimiter: Delimiter) -> Table {
        Table::from_bytes(content.as_bytes(), delimiter)
    }

    /// Parse raw file bytes, never failing.
    ///
    /// Content the codec rejects (records that are not UTF-8) becomes a
    /// single-column table with one row per lossily decoded line, so the
    /// editor stays usable.
    pub fn from_bytes(content: &[u8], delimiter: Delimiter) -> Table {
        match parse_csv_bytes(content, delimiter) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("Falling back to single-column table: {}", e);
                degenerate_table(&String::from_utf8_lossy(content))
            }
        }
    }

    /// Serialize to document text
    pub fn to_text(
        &self,
        delimiter: Delimiter,
        line_ending: LineEnding,
    ) -> Result<String, CodecError> {
        write_csv(self, delimiter, line_ending)
    }
}
