//! Logging setup and debug diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=csvgrid::session=debug` - module-level filtering
//! - `RUST_LOG=message=debug,grid=debug` - dispatch and state-diff targets
//!
//! # Log Files
//!
//! Logs are written to `~/.config/csvgrid/logs/csvgrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::session::GridSession;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/csvgrid/logs/csvgrid.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so piped CLI output stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // try_init: a host may already have installed a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of session state for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub rows: usize,
    pub columns: usize,
    pub undo_count: usize,
    pub redo_count: usize,
    pub ignore_header_row: bool,
    pub active_filters: bool,
    pub sorted: bool,
    pub matches: usize,
}

impl SessionSnapshot {
    pub fn from_session(session: &GridSession) -> Self {
        Self {
            revision: session.revision(),
            rows: session.table().row_count(),
            columns: session.table().column_count(),
            undo_count: session.history().undo_count(),
            redo_count: session.history().redo_count(),
            ignore_header_row: session.ignore_header_row,
            active_filters: session.filters.has_active_filters(),
            sorted: session.sort.is_some(),
            matches: session.search.match_count(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.revision != other.revision {
            changes.push(format!("revision {} → {}", self.revision, other.revision));
        }
        if (self.rows, self.columns) != (other.rows, other.columns) {
            changes.push(format!(
                "size {}x{} → {}x{}",
                self.rows, self.columns, other.rows, other.columns
            ));
        }
        if (self.undo_count, self.redo_count) != (other.undo_count, other.redo_count) {
            changes.push(format!(
                "history {}/{} → {}/{}",
                self.undo_count, self.redo_count, other.undo_count, other.redo_count
            ));
        }
        if self.ignore_header_row != other.ignore_header_row {
            changes.push(format!("ignore header: {}", other.ignore_header_row));
        }
        if self.active_filters != other.active_filters {
            changes.push(format!("filtered: {}", other.active_filters));
        }
        if self.sorted != other.sorted {
            changes.push(format!("sorted: {}", other.sorted));
        }
        if self.matches != other.matches {
            changes.push(format!("matches {} → {}", self.matches, other.matches));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
