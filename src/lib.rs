//! csvgrid - Elm-style tabular data engine
//!
//! This crate parses delimited text into an immutable `Table`, projects it
//! into row and column views for a grid, applies structural edits with
//! undo/redo, and filters, sorts and searches the visible rows. A host
//! drives it by feeding `GridMsg`s to `update` and performing the returned
//! `Cmd`s.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod filter;
pub mod history;
pub mod json_view;
pub mod messages;
pub mod search;
pub mod session;
pub mod sort;
pub mod table;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EngineConfig;
pub use messages::GridMsg;
pub use session::GridSession;
pub use table::{ColumnView, Delimiter, RowView, Table, TableEdit};
pub use update::update;
