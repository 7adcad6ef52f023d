//! Headless (non-interactive) mode.
//!
//! Fetches one view or the stats once and prints a plain-text table to
//! stdout, with the same rows and filtering the TUI shows.

use std::io::{self, Write};

use tracing::info;
use unicode_width::UnicodeWidthStr;

use lockerdash_core::api::Stats;
use lockerdash_core::view::{ListView, TableRow};
use lockerdash_core::{ApiClient, ViewKind};

/// What to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    List { view: ViewKind, search: Option<String> },
    Stats,
}

/// Headless mode errors.
#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Api(#[from] lockerdash_core::Error),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Run headless mode against `api`, writing to `w`.
pub async fn run(api: &ApiClient, snapshot: Snapshot, w: &mut impl Write) -> Result<(), HeadlessError> {
    match snapshot {
        Snapshot::Stats => {
            let stats = api.stats().await?;
            write_stats(w, &stats)?;
        }
        Snapshot::List { view, search } => {
            let query = search.unwrap_or_default();
            let shown = match view {
                ViewKind::Customers => write_list(w, api.list_customers().await?, &query)?,
                ViewKind::Lockers => write_list(w, api.list_lockers().await?, &query)?,
                ViewKind::Reservations => write_list(w, api.list_reservations().await?, &query)?,
                ViewKind::Payments => write_list(w, api.list_payments().await?, &query)?,
                ViewKind::Notifications => {
                    write_list(w, api.list_notifications().await?, &query)?
                }
            };
            info!(view = %view, shown, "snapshot printed");
        }
    }
    Ok(())
}

pub fn write_stats(w: &mut impl Write, stats: &Stats) -> io::Result<()> {
    writeln!(w, "  Users:            {}", stats.users)?;
    writeln!(w, "  Active lockers:   {}", stats.active_lockers)?;
    writeln!(w, "  Total lockers:    {}", stats.total_lockers)?;
    writeln!(w, "  Pending payments: {}", stats.pending_payments)?;
    Ok(())
}

/// Render `records` through a list view, apply `query`, and print the
/// visible rows as aligned columns. Returns the number of rows printed.
pub fn write_list<T: TableRow>(w: &mut impl Write, records: Vec<T>, query: &str) -> io::Result<usize> {
    let mut view: ListView<T> = ListView::new();
    view.set_query(query);
    view.replace(records);

    let rows: Vec<Vec<&str>> = view.visible_rows().map(|r| r.texts().collect()).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, text) in row.iter().enumerate() {
            if let Some(wd) = widths.get_mut(i) {
                *wd = (*wd).max(text.width());
            }
        }
    }

    write_row(w, T::HEADERS, &widths)?;
    for row in &rows {
        write_row(w, row, &widths)?;
    }
    if rows.is_empty() {
        writeln!(w, "  (no matching records)")?;
    }
    Ok(rows.len())
}

fn write_row(w: &mut impl Write, cells: &[&str], widths: &[usize]) -> io::Result<()> {
    let mut line = String::from(" ");
    for (text, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(text);
        line.push_str(&" ".repeat(width.saturating_sub(text.width()) + 1));
    }
    writeln!(w, "{}", line.trim_end())
}
