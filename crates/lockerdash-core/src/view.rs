//! List views: one per entity, rebuilt in full on every successful fetch.
//!
//! A view never diffs. `apply` either replaces every row or, on failure,
//! leaves the previous render exactly as it was.

use std::fmt;
use std::str::FromStr;

use crate::api::{Customer, Locker, Notification, Payment, Reservation};
use crate::error::Result;
use crate::filter;
use crate::status::BadgeColor;

/// The five dashboard list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Customers,
    Lockers,
    Reservations,
    Payments,
    Notifications,
}

impl ViewKind {
    pub const ALL: [Self; 5] = [
        Self::Customers,
        Self::Lockers,
        Self::Reservations,
        Self::Payments,
        Self::Notifications,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Customers => "Customers",
            Self::Lockers => "Lockers",
            Self::Reservations => "Reservations",
            Self::Payments => "Payments",
            Self::Notifications => "Notifications",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Customers => 0,
            Self::Lockers => 1,
            Self::Reservations => 2,
            Self::Payments => 3,
            Self::Notifications => 4,
        }
    }

    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title().to_lowercase())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customers" | "users" => Ok(Self::Customers),
            "lockers" => Ok(Self::Lockers),
            "reservations" => Ok(Self::Reservations),
            "payments" => Ok(Self::Payments),
            "notifications" => Ok(Self::Notifications),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// One rendered table cell. Badge cells carry their colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub badge: Option<BadgeColor>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
        }
    }

    pub fn badge(text: impl Into<String>, color: BadgeColor) -> Self {
        Self {
            text: text.into(),
            badge: Some(color),
        }
    }
}

/// Row-level action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Edit,
    Deactivate,
    Activate,
    Assign,
    Release,
    Cancel,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Deactivate => "Deactivate",
            Self::Activate => "Activate",
            Self::Assign => "Assign",
            Self::Release => "Release",
            Self::Cancel => "Cancel",
        }
    }

    pub const fn color(self) -> BadgeColor {
        match self {
            Self::Edit | Self::Assign => BadgeColor::Primary,
            Self::Deactivate | Self::Cancel => BadgeColor::Danger,
            Self::Activate => BadgeColor::Success,
            Self::Release => BadgeColor::Warning,
        }
    }
}

/// A rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Record id, when the entity has one.
    pub id: Option<i64>,
    pub cells: Vec<Cell>,
    /// `None` when the view has no action column.
    pub actions: Option<Vec<ActionKind>>,
    /// Text of the action column as displayed (`-` when it has no buttons).
    action_text: Option<String>,
    pub visible: bool,
}

impl Row {
    pub fn new(id: Option<i64>, cells: Vec<Cell>, actions: Option<Vec<ActionKind>>) -> Self {
        let action_text = actions.as_ref().map(|a| {
            if a.is_empty() {
                "-".to_string()
            } else {
                a.iter().map(|k| k.label()).collect::<Vec<_>>().join(" ")
            }
        });
        Self {
            id,
            cells,
            actions,
            action_text,
            visible: true,
        }
    }

    /// Every piece of text the row displays, in column order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .chain(self.action_text.as_deref())
    }

    pub fn action_text(&self) -> Option<&str> {
        self.action_text.as_deref()
    }

    /// The first cell carrying a badge.
    pub fn badge(&self) -> Option<&Cell> {
        self.cells.iter().find(|c| c.badge.is_some())
    }

    pub fn has_action(&self, kind: ActionKind) -> bool {
        self.actions.as_ref().is_some_and(|a| a.contains(&kind))
    }
}

/// An entity that renders as one list-view row.
pub trait TableRow {
    const KIND: ViewKind;
    const HEADERS: &'static [&'static str];

    fn to_row(&self) -> Row;
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Currency rendering: `$` and exactly two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

impl TableRow for Customer {
    const KIND: ViewKind = ViewKind::Customers;
    const HEADERS: &'static [&'static str] = &["ID", "Username", "Email", "Status", "Actions"];

    fn to_row(&self) -> Row {
        let (label, color, toggle) = if self.active {
            ("Active", BadgeColor::Success, ActionKind::Deactivate)
        } else {
            ("Inactive", BadgeColor::Danger, ActionKind::Activate)
        };
        Row::new(
            Some(self.id),
            vec![
                Cell::text(self.id.to_string()),
                Cell::text(&self.username),
                Cell::text(&self.email),
                Cell::badge(label, color),
            ],
            Some(vec![ActionKind::Edit, toggle]),
        )
    }
}

impl TableRow for Locker {
    const KIND: ViewKind = ViewKind::Lockers;
    const HEADERS: &'static [&'static str] = &["Number", "Status", "Assigned To", "Actions"];

    fn to_row(&self) -> Row {
        let action = if self.status == "occupied" {
            ActionKind::Release
        } else {
            ActionKind::Assign
        };
        Row::new(
            self.id,
            vec![
                Cell::text(&self.number),
                Cell::badge(&self.status, BadgeColor::for_status(&self.status)),
                Cell::text(or_dash(self.assigned_user_name.as_deref())),
            ],
            Some(vec![action]),
        )
    }
}

impl TableRow for Reservation {
    const KIND: ViewKind = ViewKind::Reservations;
    const HEADERS: &'static [&'static str] =
        &["ID", "User", "Locker", "Start", "Status", "Actions"];

    fn to_row(&self) -> Row {
        let actions = if self.status == "pending" {
            vec![ActionKind::Cancel]
        } else {
            Vec::new()
        };
        Row::new(
            Some(self.id),
            vec![
                Cell::text(self.id.to_string()),
                Cell::text(or_dash(self.user_id)),
                Cell::text(or_dash(self.locker_id)),
                Cell::text(&self.start_time),
                Cell::badge(&self.status, BadgeColor::for_status(&self.status)),
            ],
            Some(actions),
        )
    }
}

impl TableRow for Payment {
    const KIND: ViewKind = ViewKind::Payments;
    const HEADERS: &'static [&'static str] = &["ID", "User", "Amount", "Date", "Status"];

    fn to_row(&self) -> Row {
        Row::new(
            Some(self.id),
            vec![
                Cell::text(self.id.to_string()),
                Cell::text(or_dash(self.user_id)),
                Cell::text(format_amount(self.amount)),
                Cell::text(or_dash(self.payment_date.as_deref())),
                Cell::badge(&self.status, BadgeColor::for_status(&self.status)),
            ],
            None,
        )
    }
}

impl TableRow for Notification {
    const KIND: ViewKind = ViewKind::Notifications;
    const HEADERS: &'static [&'static str] = &["Title", "Message", "Type", "Time"];

    fn to_row(&self) -> Row {
        Row::new(
            self.id,
            vec![
                Cell::text(&self.title),
                Cell::text(&self.message),
                Cell::badge(&self.kind, BadgeColor::for_status(&self.kind)),
                Cell::text(&self.timestamp),
            ],
            None,
        )
    }
}

/// Fetch lifecycle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
}

/// A list view bound to one entity type.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    records: Vec<T>,
    rows: Vec<Row>,
    query: String,
    state: FetchState,
    loaded: bool,
    last_error: Option<String>,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rows: Vec::new(),
            query: String::new(),
            state: FetchState::Idle,
            loaded: false,
            last_error: None,
        }
    }
}

impl<T: TableRow> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn kind(&self) -> ViewKind {
        T::KIND
    }

    pub fn begin_fetch(&mut self) {
        self.state = FetchState::Fetching;
    }

    /// Apply a fetch result. Success replaces every row and re-applies the
    /// current query; failure keeps the previous render. Returns the number
    /// of rendered rows, or hands the error back to the caller.
    pub fn apply(&mut self, result: Result<Vec<T>>) -> Result<usize> {
        self.state = FetchState::Idle;
        match result {
            Ok(records) => Ok(self.replace(records)),
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace every row with `records` and re-apply the current query.
    /// Returns the number of rendered rows.
    pub fn replace(&mut self, records: Vec<T>) -> usize {
        self.rows = records.iter().map(T::to_row).collect();
        self.records = records;
        self.loaded = true;
        self.last_error = None;
        filter::apply_filter(&mut self.rows, &self.query);
        self.rows.len()
    }

    /// Update the search query and re-filter. Returns the visible row count.
    pub fn set_query(&mut self, query: impl Into<String>) -> usize {
        self.query = query.into();
        filter::apply_filter(&mut self.rows, &self.query)
    }
}

impl<T> ListView<T> {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    /// Record and row behind the `n`-th visible row.
    pub fn visible_entry(&self, n: usize) -> Option<(&Row, &T)> {
        let (idx, row) = self.rows.iter().enumerate().filter(|(_, r)| r.visible).nth(n)?;
        self.records.get(idx).map(|rec| (row, rec))
    }

    pub const fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_fetching(&self) -> bool {
        self.state == FetchState::Fetching
    }

    /// Whether at least one fetch has succeeded.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
