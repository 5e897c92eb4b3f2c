//! CSV reading and writing using the csv crate
//!
//! RFC 4180 compliant parsing with support for quoted fields,
//! escaped quotes, embedded newlines and custom delimiters.

use super::model::{Delimiter, LineEnding, Table};
use std::io::Cursor;

/// Error type for CSV parsing and writing
#[derive(Debug, Clone)]
pub struct CodecError {
    pub message: String,
    pub line: Option<usize>,
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "CSV error at line {}: {}", line, self.message),
            None => write!(f, "CSV error: {}", self.message),
        }
    }
}

impl std::error::Error for CodecError {}

/// Parse CSV content into a Table
///
/// Uses the csv crate for RFC 4180 compliant parsing. Ragged rows are kept
/// as-is. The reader is flexible and the input is already UTF-8, so in
/// practice this never returns an error; see `parse_csv_bytes` for input
/// the codec can reject.
pub fn parse_csv(content: &str, delimiter: Delimiter) -> Result<Table, CodecError> {
    parse_csv_bytes(content.as_bytes(), delimiter)
}

/// Parse raw file bytes. Fails on records that are not valid UTF-8.
pub fn parse_csv_bytes(content: &[u8], delimiter: Delimiter) -> Result<Table, CodecError> {
    let cursor = Cursor::new(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(cursor);

    let mut rows: Vec<Vec<String>> = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                rows.push(row);
            }
            Err(e) => {
                return Err(CodecError {
                    message: e.to_string(),
                    line: Some(line_num + 1),
                });
            }
        }
    }

    Ok(Table::from_rows(rows))
}

/// Serialize a Table back to CSV text
pub fn write_csv(
    table: &Table,
    delimiter: Delimiter,
    line_ending: LineEnding,
) -> Result<String, CodecError> {
    let terminator = match line_ending {
        LineEnding::Lf => csv::Terminator::Any(b'\n'),
        LineEnding::CrLf => csv::Terminator::CRLF,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.byte())
        .terminator(terminator)
        .flexible(true)
        .from_writer(Vec::new());

    for (row_idx, row) in table.rows().enumerate() {
        writer.write_record(row).map_err(|e| CodecError {
            message: e.to_string(),
            line: Some(row_idx + 1),
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| CodecError {
        message: e.to_string(),
        line: None,
    })?;

    String::from_utf8(bytes).map_err(|e| CodecError {
        message: e.to_string(),
        line: None,
    })
}

/// Single-column table with one row per line, used when parsing fails
pub fn degenerate_table(content: &str) -> Table {
    Table::from_rows(
        content
            .lines()
            .map(|line| vec![line.to_string()])
            .collect(),
    )
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Detect the line terminator from the first line break
pub fn detect_line_ending(content: &str) -> LineEnding {
    match content.find('\n') {
        Some(idx) if idx > 0 && content.as_bytes()[idx - 1] == b'\r' => LineEnding::CrLf,
        _ => LineEnding::Lf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "a,b,c\n1,2,3\n";
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.get(0, 0), "a");
        assert_eq!(table.get(1, 2), "3");
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = r#""hello, world","test"
"with ""quotes""","normal"
"#;
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.get(0, 0), "hello, world");
        assert_eq!(table.get(1, 0), "with \"quotes\"");
    }

    #[test]
    fn test_parse_embedded_newline() {
        let content = "name,notes\nAlice,\"line one\nline two\"\n";
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, 1), "line one\nline two");
    }

    #[test]
    fn test_parse_tsv() {
        let content = "a\tb\tc\n1\t2\t3\n";
        let table = parse_csv(content, Delimiter::Tab).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), "b");
    }

    #[test]
    fn test_parse_ragged_rows() {
        let content = "a,b,c\n1,2\n";
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row(1).map(|r| r.len()), Some(2));
        assert_eq!(table.get(1, 2), "");
    }

    #[test]
    fn test_parse_empty() {
        let table = parse_csv("", Delimiter::Comma).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_single_column() {
        let content = "a\nb\nc\n";
        let table = parse_csv(content, Delimiter::Comma).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_write_quotes_special_cells() {
        let table = Table::from_strs(&[vec!["a,b", "say \"hi\"", "two\nlines"]]);
        let text = write_csv(&table, Delimiter::Comma, LineEnding::Lf).unwrap();

        assert_eq!(text, "\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\"\n");
    }

    #[test]
    fn test_write_crlf() {
        let table = Table::from_strs(&[vec!["a", "b"], vec!["1", "2"]]);
        let text = write_csv(&table, Delimiter::Comma, LineEnding::CrLf).unwrap();

        assert_eq!(text, "a,b\r\n1,2\r\n");
    }

    #[test]
    fn test_write_then_parse_restores_table() {
        let table = Table::from_strs(&[
            vec!["name", "quote"],
            vec!["Doe, Jane", "\"hello\""],
            vec!["", "multi\nline"],
        ]);
        let text = write_csv(&table, Delimiter::Semicolon, LineEnding::Lf).unwrap();
        let parsed = parse_csv(&text, Delimiter::Semicolon).unwrap();

        assert_eq!(parsed, table);
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_csv_bytes(b"a,b\n\xff,c\n", Delimiter::Comma).unwrap_err();
        assert_eq!(err.line, Some(2));
        assert!(err.to_string().starts_with("CSV error at line 2"));
    }

    #[test]
    fn test_unterminated_quote_still_parses() {
        let table = parse_csv("a,\"b\nc\n", Delimiter::Comma).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.get(0, 1), "b\nc\n");
    }

    #[test]
    fn test_degenerate_table() {
        let table = degenerate_table("first line\nsecond, line\n");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.get(1, 0), "second, line");
    }

    #[test]
    fn test_detect_delimiter_comma() {
        let content = "a,b,c\n1,2,3\n";
        assert_eq!(detect_delimiter(content), Delimiter::Comma);
    }

    #[test]
    fn test_detect_delimiter_tab() {
        let content = "a\tb\tc\n1\t2\t3\n";
        assert_eq!(detect_delimiter(content), Delimiter::Tab);
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        let content = "a|b|c\n1|2|3\n";
        assert_eq!(detect_delimiter(content), Delimiter::Pipe);
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        let content = "a;b;c\n1;2;3\n";
        assert_eq!(detect_delimiter(content), Delimiter::Semicolon);
    }

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(detect_line_ending("a,b\r\n1,2\r\n"), LineEnding::CrLf);
        assert_eq!(detect_line_ending("a,b\n1,2\n"), LineEnding::Lf);
        assert_eq!(detect_line_ending("a,b"), LineEnding::Lf);
    }
}
