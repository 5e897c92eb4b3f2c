//! Command-line front end
//!
//! Loads a delimited file into a `GridSession`, applies filters, sort and
//! search through the same messages a grid UI would send, then prints the
//! visible rows.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::json_view::JsonView;
use crate::messages::GridMsg;
use crate::session::GridSession;
use crate::sort::SortDirection;
use crate::table::{parse_column_key, ColumnView, Delimiter, RowView, Table};
use crate::update::update;

/// Widest a rendered column gets before truncation
const MAX_RENDER_WIDTH: usize = 40;

/// Inspect and query delimited text files
#[derive(Parser, Debug)]
#[command(name = "csvgrid", version, about = "Inspect and query delimited text files")]
pub struct CliArgs {
    /// File to open
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter: comma, tab, pipe or semicolon (detected if omitted)
    #[arg(short, long, value_name = "NAME")]
    pub delimiter: Option<String>,

    /// Treat the first row as data instead of column names
    #[arg(long)]
    pub no_header: bool,

    /// Keep rows whose column contains TEXT (repeatable, combined with AND)
    #[arg(short, long = "filter", value_name = "KEY=TEXT")]
    pub filters: Vec<String>,

    /// Sort by a column, append `:desc` for descending order
    #[arg(short, long, value_name = "KEY[:desc]")]
    pub sort: Option<String>,

    /// Report cells containing TEXT
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text columns
    Table,
    /// Delimited text in the input's delimiter
    Csv,
    /// Columns and rows as JSON
    Json,
}

/// A parsed `--sort` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub key: String,
    pub direction: SortDirection,
}

/// Run options derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file: PathBuf,
    pub delimiter: Option<Delimiter>,
    pub ignore_header_row: bool,
    /// (column reference, text) pairs; references are resolved after loading
    pub filters: Vec<(String, String)>,
    pub sort: Option<SortArg>,
    pub search: Option<String>,
    pub format: OutputFormat,
}

impl CliArgs {
    /// Validate CLI args into run options
    pub fn into_config(self) -> Result<RunConfig, String> {
        let delimiter = match self.delimiter.as_deref() {
            None => None,
            Some(name) => Some(
                Delimiter::from_name(name)
                    .ok_or_else(|| format!("Unknown delimiter '{}'", name))?,
            ),
        };

        let filters = self
            .filters
            .iter()
            .map(|raw| {
                raw.split_once('=')
                    .map(|(key, text)| (key.trim().to_string(), text.to_string()))
                    .ok_or_else(|| format!("Filter '{}' must look like KEY=TEXT", raw))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sort = self.sort.as_deref().map(parse_sort_arg).transpose()?;

        Ok(RunConfig {
            file: self.file,
            delimiter,
            ignore_header_row: self.no_header,
            filters,
            sort,
            search: self.search,
            format: self.format,
        })
    }
}

fn parse_sort_arg(raw: &str) -> Result<SortArg, String> {
    let (key, direction) = match raw.rsplit_once(':') {
        Some((key, "desc")) => (key, SortDirection::Descending),
        Some((key, "asc")) => (key, SortDirection::Ascending),
        Some((_, other)) => return Err(format!("Unknown sort direction '{}'", other)),
        None => (raw, SortDirection::Ascending),
    };
    if key.trim().is_empty() {
        return Err("Sort key is empty".to_string());
    }
    Ok(SortArg {
        key: key.trim().to_string(),
        direction,
    })
}

/// Resolve a user column reference to a column key.
///
/// Accepts a key (`col2`), a 0-based position (`2`) or a header name
/// (case-insensitive).
pub fn resolve_column_key(reference: &str, columns: &[ColumnView]) -> Option<String> {
    let data_columns = || columns.iter().filter(|c| !c.reserved);

    if let Some(index) = parse_column_key(reference).or_else(|| reference.parse().ok()) {
        return data_columns()
            .find(|c| c.data_index() == Some(index))
            .map(|c| c.key.clone());
    }

    data_columns()
        .find(|c| !c.name.is_empty() && c.name.eq_ignore_ascii_case(reference))
        .map(|c| c.key.clone())
}

/// Apply the run options to a session through the update loop
pub fn apply_options(session: &mut GridSession, config: &RunConfig) -> Result<(), String> {
    update(session, GridMsg::SetIgnoreHeaderRow(config.ignore_header_row));

    let columns = session.columns();
    let resolve = |reference: &str| {
        resolve_column_key(reference, &columns)
            .ok_or_else(|| format!("Unknown column '{}'", reference))
    };

    for (reference, text) in &config.filters {
        let key = resolve(reference)?;
        update(session, GridMsg::set_filter(key, text.clone()));
    }

    if let Some(sort) = &config.sort {
        let key = resolve(&sort.key)?;
        update(
            session,
            GridMsg::SortBy {
                key,
                direction: sort.direction,
            },
        );
    }

    if let Some(query) = &config.search {
        update(session, GridMsg::Search(query.clone()));
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    columns: &'a [ColumnView],
    rows: &'a [RowView],
}

/// Render the session's visible rows in the requested format
pub fn render(session: &GridSession, format: OutputFormat) -> Result<String, String> {
    let columns = session.columns();
    let rows = session.visible_rows();

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&JsonOutput {
            columns: &columns,
            rows: &rows,
        })
        .map_err(|e| format!("Failed to encode JSON: {}", e)),
        OutputFormat::Csv => {
            let width = session.table().column_count();
            let mut out: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
            if !session.ignore_header_row {
                if let Some(header) = session.table().row(0) {
                    out.push(header.to_vec());
                }
            }
            out.extend(rows.iter().map(|row| row.to_cells(width)));
            Table::from_rows(out)
                .to_text(session.delimiter, session.line_ending)
                .map_err(|e| e.to_string())
        }
        OutputFormat::Table => Ok(render_text_table(&columns, &rows)),
    }
}

/// Cell text for display: JSON documents collapse to a preview
fn display_cell(value: &str) -> String {
    let text = match JsonView::parse_cell(value) {
        Some(json) => json.preview(),
        None => value.replace(['\r', '\n'], " "),
    };
    truncate(&text, MAX_RENDER_WIDTH)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn render_text_table(columns: &[ColumnView], rows: &[RowView]) -> String {
    let header: Vec<String> = columns
        .iter()
        .map(|c| {
            if c.reserved || !c.name.is_empty() {
                truncate(&c.name, MAX_RENDER_WIDTH)
            } else {
                c.key.clone()
            }
        })
        .collect();

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| {
                    if c.reserved {
                        (row.id + 1).to_string()
                    } else {
                        display_cell(row.value(&c.key))
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format_line(&header));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(body.iter().map(|cells| format_line(cells)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One line per search match, in match order
pub fn render_matches(session: &GridSession) -> Vec<String> {
    session
        .search
        .matches()
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "match {} of {}: row {}, column {}",
                i + 1,
                session.search.match_count(),
                m.row_index + 1,
                m.column_key,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["csvgrid", "data.csv"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    fn people() -> GridSession {
        GridSession::open(
            "Name,City\nAlice,Paris\nbob,Oslo\nCarol,paris\n",
            None,
            EngineConfig::default(),
        )
    }

    #[test]
    fn test_parse_filters_and_sort() {
        let config = args(&["-f", "City=par", "--sort", "Name:desc"])
            .into_config()
            .unwrap();

        assert_eq!(config.filters, vec![("City".to_string(), "par".to_string())]);
        assert_eq!(
            config.sort,
            Some(SortArg {
                key: "Name".to_string(),
                direction: SortDirection::Descending
            })
        );
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_bad_arguments_rejected() {
        assert!(args(&["-f", "nokey"]).into_config().is_err());
        assert!(args(&["--sort", "Name:sideways"]).into_config().is_err());
        assert!(args(&["--delimiter", "colon"]).into_config().is_err());
    }

    #[test]
    fn test_resolve_column_key() {
        let session = people();
        let columns = session.columns();

        assert_eq!(resolve_column_key("col1", &columns), Some("col1".to_string()));
        assert_eq!(resolve_column_key("0", &columns), Some("col0".to_string()));
        assert_eq!(resolve_column_key("city", &columns), Some("col1".to_string()));
        assert_eq!(resolve_column_key("#", &columns), None);
        assert_eq!(resolve_column_key("col9", &columns), None);
    }

    #[test]
    fn test_apply_and_render_csv() {
        let mut session = people();
        let config = args(&["-f", "city=paris", "--sort", "name:desc", "--format", "csv"])
            .into_config()
            .unwrap();

        apply_options(&mut session, &config).unwrap();
        let out = render(&session, config.format).unwrap();
        assert_eq!(out, "Name,City\nCarol,paris\nAlice,Paris\n");
    }

    #[test]
    fn test_render_text_table() {
        let session = people();
        let out = render(&session, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "#  Name   City");
        assert_eq!(lines[1], "-  -----  -----");
        assert_eq!(lines[2], "1  Alice  Paris");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_json() {
        let session = people();
        let out = render(&session, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["columns"][1]["name"], "Name");
        assert_eq!(value["rows"][1]["col0"], "bob");
    }

    #[test]
    fn test_search_lines() {
        let mut session = people();
        let config = args(&["--search", "paris"]).into_config().unwrap();
        apply_options(&mut session, &config).unwrap();

        let lines = render_matches(&session);
        assert_eq!(
            lines,
            vec![
                "match 1 of 2: row 1, column col1",
                "match 2 of 2: row 3, column col1"
            ]
        );
    }

    #[test]
    fn test_json_cells_previewed() {
        assert_eq!(display_cell(r#"{"a": [1, 2]}"#), "{a: […2]}");
        assert_eq!(display_cell("line1\nline2"), "line1 line2");
    }
}
