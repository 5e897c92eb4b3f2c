//! Column sort for the row view
//!
//! Sorting orders the projected rows only; the Table keeps its order until
//! the session commits the sorted rows back as an edit.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::table::RowView;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Current sort state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_key: column_key.into(),
            direction,
        }
    }
}

/// Comparable form of a cell: numbers before text, blanks handled separately
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// None for blank cells
    fn from_cell(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(SortKey::Number(n)),
            _ => Some(SortKey::Text(trimmed.to_lowercase())),
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Order rows by one column.
///
/// Stable: equal keys keep their current relative order. Blank cells sort
/// last in both directions. `None` borrows the rows back unchanged.
pub fn sort_rows<'a>(rows: &'a [RowView], sort: Option<&SortState>) -> Cow<'a, [RowView]> {
    let Some(sort) = sort else {
        return Cow::Borrowed(rows);
    };

    let mut keyed: Vec<(Option<SortKey>, &RowView)> = rows
        .iter()
        .map(|row| (SortKey::from_cell(row.value(&sort.column_key)), row))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match sort.direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => b.cmp(a),
        },
    });

    Cow::Owned(
        keyed
            .into_iter()
            .enumerate()
            .map(|(index, (_, row))| RowView {
                index,
                ..row.clone()
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&str]) -> Vec<RowView> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| RowView::from_cells(i, &[v.to_string()]))
            .collect()
    }

    fn column(sorted: &[RowView]) -> Vec<&str> {
        sorted.iter().map(|r| r.value("col0")).collect()
    }

    #[test]
    fn test_no_sort_borrows() {
        let input = rows(&["b", "a"]);
        assert!(matches!(sort_rows(&input, None), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sort_numbers_numerically() {
        let input = rows(&["10", "9", "100", "-1"]);
        let state = SortState::new("col0", SortDirection::Ascending);

        let sorted = sort_rows(&input, Some(&state));
        assert_eq!(column(&sorted), vec!["-1", "9", "10", "100"]);
    }

    #[test]
    fn test_sort_text_case_insensitive_and_stable() {
        let input = rows(&["bob", "Alice", "BOB", "alice"]);
        let state = SortState::new("col0", SortDirection::Ascending);

        let sorted = sort_rows(&input, Some(&state));
        assert_eq!(column(&sorted), vec!["Alice", "alice", "bob", "BOB"]);
    }

    #[test]
    fn test_sort_numbers_before_text_blanks_last() {
        let input = rows(&["", "zeta", "3", "alpha", "1"]);

        let asc = sort_rows(&input, Some(&SortState::new("col0", SortDirection::Ascending)));
        assert_eq!(column(&asc), vec!["1", "3", "alpha", "zeta", ""]);

        let desc = sort_rows(&input, Some(&SortState::new("col0", SortDirection::Descending)));
        assert_eq!(column(&desc), vec!["zeta", "alpha", "3", "1", ""]);
    }

    #[test]
    fn test_sort_reindexes_but_keeps_ids() {
        let input = rows(&["b", "a"]);
        let sorted = sort_rows(&input, Some(&SortState::new("col0", SortDirection::Ascending)));

        assert_eq!(sorted[0].id, 1);
        assert_eq!(sorted[0].index, 0);
        assert_eq!(sorted[1].id, 0);
        assert_eq!(sorted[1].index, 1);
    }
}
