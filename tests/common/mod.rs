//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use csvgrid::config::EngineConfig;
use csvgrid::table::{Delimiter, Table};
use csvgrid::{Cmd, GridSession};

/// Sample document used across tests
pub const PEOPLE_CSV: &str = "Name,Age,City\nAlice,30,Paris\nBob,25,Oslo\nCarol,41,paris\n";

/// Session opened on `text` with default settings
pub fn test_session(text: &str) -> GridSession {
    GridSession::open(text, Some(Delimiter::Comma), EngineConfig::default())
}

/// Session with a custom history bound
pub fn test_session_with_history(text: &str, max_history_size: usize) -> GridSession {
    let config = EngineConfig {
        max_history_size,
        ..EngineConfig::default()
    };
    GridSession::open(text, Some(Delimiter::Comma), config)
}

/// Table from string literals
pub fn table(rows: &[&[&str]]) -> Table {
    Table::from_strs(rows)
}

/// Current document text
pub fn session_text(session: &GridSession) -> String {
    session.to_text().expect("table serializes")
}

/// Text carried by a PostText command, panicking on anything else
pub fn posted_text(cmd: Option<Cmd>) -> String {
    match cmd {
        Some(Cmd::PostText { text, .. }) => text,
        other => panic!("expected PostText, got {:?}", other),
    }
}

/// Column values of the visible rows for one key
pub fn visible_column(session: &GridSession, key: &str) -> Vec<String> {
    session
        .visible_rows()
        .iter()
        .map(|row| row.value(key).to_string())
        .collect()
}
