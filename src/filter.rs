//! Per-column substring filters
//!
//! Filters are keyed by column key (`col{i}`). A filter is active when its
//! trimmed text is non-empty. Active filters combine with AND; matching is
//! case-insensitive containment.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::table::RowView;

/// Filter configuration for the grid
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Raw filter text per column key, as typed
    filters: HashMap<String, String>,
}

/// Lowercased, trimmed needle for an active filter
fn needle(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the filter text for a column
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(key.into(), value.into());
    }

    /// Remove the filter for a column
    pub fn clear_filter(&mut self, key: &str) {
        self.filters.remove(key);
    }

    /// Remove every filter
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Raw filter text for a column (may be blank)
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(|s| s.as_str())
    }

    /// Does this column have a non-blank filter?
    pub fn is_filter_active(&self, key: &str) -> bool {
        self.filters
            .get(key)
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Is any column actively filtered?
    pub fn has_active_filters(&self) -> bool {
        self.filters.values().any(|value| !value.trim().is_empty())
    }

    /// Active filters as (column key, lowercased needle)
    fn active(&self) -> Vec<(&str, String)> {
        self.filters
            .iter()
            .filter_map(|(key, value)| needle(value).map(|n| (key.as_str(), n)))
            .collect()
    }

    /// Check if one row passes every active filter
    pub fn matches(&self, row: &RowView) -> bool {
        Self::row_passes(row, &self.active())
    }

    fn row_passes(row: &RowView, active: &[(&str, String)]) -> bool {
        active.iter().all(|(key, needle)| match row.get(key) {
            Some(value) => value.to_lowercase().contains(needle.as_str()),
            None => false,
        })
    }

    /// Rows passing all active filters.
    ///
    /// With nothing active the input is borrowed back unchanged.
    pub fn filtered_rows<'a>(&self, rows: &'a [RowView]) -> Cow<'a, [RowView]> {
        let active = self.active();
        if active.is_empty() {
            return Cow::Borrowed(rows);
        }

        Cow::Owned(
            rows.iter()
                .filter(|row| Self::row_passes(row, &active))
                .cloned()
                .collect(),
        )
    }
}
