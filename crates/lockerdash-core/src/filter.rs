//! Client-side substring search over rendered rows.
//!
//! Rows are hidden, never removed, so filtering is idempotent and an empty
//! query brings every row back.

use crate::view::Row;

/// Whether any displayed text of `row` contains `needle` (already lowercased).
pub fn row_matches(row: &Row, needle: &str) -> bool {
    row.texts().any(|text| text.to_lowercase().contains(needle))
}

/// Show rows matching `query` case-insensitively and hide the rest.
/// Returns the number of visible rows.
pub fn apply_filter(rows: &mut [Row], query: &str) -> usize {
    let needle = query.to_lowercase();
    let mut visible = 0;
    for row in rows.iter_mut() {
        row.visible = row_matches(row, &needle);
        if row.visible {
            visible += 1;
        }
    }
    visible
}
