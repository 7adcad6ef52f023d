//! TUI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    BarChart, Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs,
};

use lockerdash_core::status::BadgeColor;
use lockerdash_core::view::{self, TableRow};
use lockerdash_core::{ListView, ViewKind};

use super::panels;
use crate::app::{App, AppMode};

/// Draw the full UI.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Tabs
            Constraint::Length(8), // Charts
            Constraint::Length(3), // Search
            Constraint::Min(4),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_tabs(frame, app, chunks[1]);
    draw_charts(frame, app, chunks[2]);
    draw_search(frame, app, chunks[3]);
    draw_table(frame, app, chunks[4]);
    draw_status_bar(frame, app, chunks[5]);

    match app.mode {
        AppMode::Form => panels::draw_form(frame, app),
        AppMode::Confirm => panels::draw_confirm(frame, app),
        AppMode::Normal | AppMode::Search => {}
    }
    panels::draw_toasts(frame, app);
}

/// Terminal colour for a badge.
pub const fn badge_color(color: BadgeColor) -> Color {
    match color {
        BadgeColor::Success => Color::Green,
        BadgeColor::Primary => Color::Blue,
        BadgeColor::Warning => Color::Yellow,
        BadgeColor::Danger => Color::Red,
        BadgeColor::Secondary => Color::Gray,
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let stats = app.stats.map_or_else(
        || " | stats: -".to_string(),
        |s| {
            format!(
                " | users: {}  lockers: {}/{}  pending payments: {}",
                s.users, s.active_lockers, s.total_lockers, s.pending_payments
            )
        },
    );
    let busy = if app.is_fetching(app.active) {
        " [loading...]"
    } else {
        ""
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "lockerdash",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(stats),
        Span::styled(busy, Style::default().fg(Color::Yellow)),
    ]));
    frame.render_widget(header, area);
}

fn draw_tabs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let titles = ViewKind::ALL
        .iter()
        .map(|k| format!("{} {}", k.index() + 1, k.title()));
    let tabs = Tabs::new(titles)
        .select(app.active.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_charts(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let charts = app.charts();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let users_title = charts
        .total_users
        .map_or_else(|| "Users".to_string(), |n| format!("Users ({n})"));
    let users = [("Active", charts.users.active), ("Passive", charts.users.passive)];
    let lockers = [("Full", charts.lockers.full), ("Empty", charts.lockers.empty)];
    let payments = [
        ("Done", charts.payments.completed),
        ("Pending", charts.payments.pending),
        ("Cancel", charts.payments.cancelled),
    ];

    render_bar_chart(frame, cols[0], &users_title, &users, Color::Green);
    render_bar_chart(frame, cols[1], "Lockers", &lockers, Color::Blue);
    render_bar_chart(frame, cols[2], "Payments", &payments, Color::Yellow);
}

fn render_bar_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    data: &[(&str, u64)],
    color: Color,
) {
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .data(data)
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));
    frame.render_widget(chart, area);
}

fn draw_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let query = app.query(app.active);
    let editing = app.mode == AppMode::Search;
    let (text, style) = if query.is_empty() && !editing {
        (
            "Press / to search".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (query.to_string(), Style::default())
    };
    let border = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Search {}", app.active.title()))
            .border_style(border),
    );
    frame.render_widget(search, area);

    if editing {
        let x = area.x + 1 + u16::try_from(query.chars().count()).unwrap_or(u16::MAX);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_table(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selected = app.selected();
    match app.active {
        ViewKind::Customers => render_list(frame, area, &app.customers, selected),
        ViewKind::Lockers => render_list(frame, area, &app.lockers, selected),
        ViewKind::Reservations => render_list(frame, area, &app.reservations, selected),
        ViewKind::Payments => render_list(frame, area, &app.payments, selected),
        ViewKind::Notifications => render_list(frame, area, &app.notifications, selected),
    }
}

fn render_list<T: TableRow>(frame: &mut Frame<'_>, area: Rect, list: &ListView<T>, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            "{} ({}/{})",
            T::KIND.title(),
            list.visible_count(),
            list.rows().len()
        ));

    if list.visible_count() == 0 {
        let msg = if !list.is_loaded() {
            "Loading..."
        } else if list.rows().is_empty() {
            "No records"
        } else {
            "No matching records"
        };
        let empty = Paragraph::new(Span::styled(msg, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(T::HEADERS.iter().copied()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = list.visible_rows().map(table_row);
    let n = u32::try_from(T::HEADERS.len()).unwrap_or(1);
    let widths = T::HEADERS.iter().map(|_| Constraint::Ratio(1, n));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn table_row(row: &view::Row) -> Row<'static> {
    let mut cells: Vec<Cell<'static>> = row
        .cells
        .iter()
        .map(|c| match c.badge {
            Some(color) => Cell::from(Span::styled(
                c.text.clone(),
                Style::default()
                    .fg(badge_color(color))
                    .add_modifier(Modifier::BOLD),
            )),
            None => Cell::from(c.text.clone()),
        })
        .collect();

    if let Some(actions) = &row.actions {
        let line = if actions.is_empty() {
            Line::from("-")
        } else {
            Line::from(
                actions
                    .iter()
                    .flat_map(|a| {
                        [
                            Span::styled(
                                format!("[{}]", a.label()),
                                Style::default().fg(badge_color(a.color())),
                            ),
                            Span::raw(" "),
                        ]
                    })
                    .collect::<Vec<_>>(),
            )
        };
        cells.push(Cell::from(line));
    }
    Row::new(cells)
}

fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let hints = match app.mode {
        AppMode::Normal if app.active == ViewKind::Customers => {
            " | Tab/1-5: view  /: search  r: reload  n: new  e: edit  t: toggle  q: quit"
        }
        AppMode::Normal => " | Tab/1-5: view  /: search  r: reload  q: quit",
        AppMode::Search => " | Enter/Esc: done",
        AppMode::Form => " | Tab: next  Space: toggle  Enter: save  Esc: cancel",
        AppMode::Confirm => " | y: yes  n: no",
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(app.status.as_str(), Style::default().fg(Color::DarkGray)),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(status, area);
}
