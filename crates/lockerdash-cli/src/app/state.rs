//! Application state and types.

use std::time::Instant;

use tracing::{debug, error, warn};

use lockerdash_core::api::{Customer, Locker, Notification, Payment, Reservation, Stats};
use lockerdash_core::charts::ChartSet;
use lockerdash_core::form::CustomerForm;
use lockerdash_core::view::ActionKind;
use lockerdash_core::{ListView, Severity, ToastQueue, ViewKind};

use crate::actions::CustomerAction;
use crate::sync::DashboardEvent;

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing into the active view's search box.
    Search,
    /// Create/edit customer form overlay.
    Form,
    /// Yes/no confirmation overlay.
    Confirm,
}

/// Destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub prompt: String,
    pub action: CustomerAction,
}

/// TUI application state.
pub struct App {
    pub mode: AppMode,
    pub active: ViewKind,
    pub customers: ListView<Customer>,
    pub lockers: ListView<Locker>,
    pub reservations: ListView<Reservation>,
    pub payments: ListView<Payment>,
    pub notifications: ListView<Notification>,
    /// Last successful stats poll.
    pub stats: Option<Stats>,
    pub toasts: ToastQueue,
    /// Selected visible row, per view.
    selected: [usize; 5],
    pub form: Option<CustomerForm>,
    pub confirm: Option<PendingConfirm>,
    pub should_quit: bool,
    pub status: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new(ToastQueue::default())
    }
}

impl App {
    pub fn new(toasts: ToastQueue) -> Self {
        Self {
            mode: AppMode::Normal,
            active: ViewKind::Customers,
            customers: ListView::new(),
            lockers: ListView::new(),
            reservations: ListView::new(),
            payments: ListView::new(),
            notifications: ListView::new(),
            stats: None,
            toasts,
            selected: [0; 5],
            form: None,
            confirm: None,
            should_quit: false,
            status: String::new(),
        }
    }

    /// Apply a background result. Returns a view to fetch again, if any.
    pub fn handle_event(&mut self, event: DashboardEvent) -> Option<ViewKind> {
        match event {
            DashboardEvent::Customers(result) => {
                if let Err(e) = self.customers.apply(result) {
                    error!(error = %e, "Error loading customers");
                    self.toasts.push("Error loading customers", Severity::Danger);
                }
                self.clamp_selection(ViewKind::Customers);
            }
            DashboardEvent::Lockers(result) => {
                if let Err(e) = self.lockers.apply(result) {
                    error!(error = %e, "Error loading lockers");
                }
                self.clamp_selection(ViewKind::Lockers);
            }
            DashboardEvent::Reservations(result) => {
                if let Err(e) = self.reservations.apply(result) {
                    error!(error = %e, "Error loading reservations");
                }
                self.clamp_selection(ViewKind::Reservations);
            }
            DashboardEvent::Payments(result) => {
                if let Err(e) = self.payments.apply(result) {
                    error!(error = %e, "Error loading payments");
                }
                self.clamp_selection(ViewKind::Payments);
            }
            DashboardEvent::Notifications(result) => {
                if let Err(e) = self.notifications.apply(result) {
                    error!(error = %e, "Error loading notifications");
                }
                self.clamp_selection(ViewKind::Notifications);
            }
            DashboardEvent::Stats(result) => match result {
                Ok(stats) => self.stats = Some(stats),
                Err(e) => warn!(error = %e, "Error loading stats"),
            },
            DashboardEvent::EditLoaded(result) => match result {
                // Never clobber a search, form or confirm the user is in.
                Ok(customer) if self.mode != AppMode::Normal => {
                    debug!(id = customer.id, mode = ?self.mode, "edit form dropped: busy");
                }
                Ok(customer) => {
                    self.form = Some(CustomerForm::edit(&customer));
                    self.mode = AppMode::Form;
                }
                Err(e) => {
                    error!(error = %e, "Error loading customer for edit");
                    let msg = e
                        .server_message()
                        .unwrap_or("Failed to update customer")
                        .to_string();
                    self.toasts.push(msg, Severity::Danger);
                }
            },
            DashboardEvent::ActionFinished(outcome) => {
                self.toasts.push(outcome.message, outcome.severity);
                return outcome.refetch;
            }
        }
        None
    }

    // ---- navigation ----

    pub fn switch_to(&mut self, kind: ViewKind) {
        self.active = kind;
    }

    pub fn next_view(&mut self) {
        self.active = self.active.next();
    }

    pub fn prev_view(&mut self) {
        self.active = self.active.prev();
    }

    pub const fn selected(&self) -> usize {
        self.selected[self.active.index()]
    }

    pub fn select_next(&mut self) {
        let count = self.visible_count(self.active);
        let sel = &mut self.selected[self.active.index()];
        if count > 0 && *sel + 1 < count {
            *sel += 1;
        }
    }

    pub fn select_prev(&mut self) {
        let sel = &mut self.selected[self.active.index()];
        *sel = sel.saturating_sub(1);
    }

    fn clamp_selection(&mut self, kind: ViewKind) {
        let count = self.visible_count(kind);
        let sel = &mut self.selected[kind.index()];
        *sel = (*sel).min(count.saturating_sub(1));
    }

    // ---- per-view access ----

    pub fn visible_count(&self, kind: ViewKind) -> usize {
        match kind {
            ViewKind::Customers => self.customers.visible_count(),
            ViewKind::Lockers => self.lockers.visible_count(),
            ViewKind::Reservations => self.reservations.visible_count(),
            ViewKind::Payments => self.payments.visible_count(),
            ViewKind::Notifications => self.notifications.visible_count(),
        }
    }

    pub fn query(&self, kind: ViewKind) -> &str {
        match kind {
            ViewKind::Customers => self.customers.query(),
            ViewKind::Lockers => self.lockers.query(),
            ViewKind::Reservations => self.reservations.query(),
            ViewKind::Payments => self.payments.query(),
            ViewKind::Notifications => self.notifications.query(),
        }
    }

    /// Replace a view's query and re-filter its rows.
    pub fn set_query(&mut self, kind: ViewKind, query: String) {
        match kind {
            ViewKind::Customers => self.customers.set_query(query),
            ViewKind::Lockers => self.lockers.set_query(query),
            ViewKind::Reservations => self.reservations.set_query(query),
            ViewKind::Payments => self.payments.set_query(query),
            ViewKind::Notifications => self.notifications.set_query(query),
        };
        self.selected[kind.index()] = 0;
    }

    pub fn begin_fetch(&mut self, kind: ViewKind) {
        match kind {
            ViewKind::Customers => self.customers.begin_fetch(),
            ViewKind::Lockers => self.lockers.begin_fetch(),
            ViewKind::Reservations => self.reservations.begin_fetch(),
            ViewKind::Payments => self.payments.begin_fetch(),
            ViewKind::Notifications => self.notifications.begin_fetch(),
        }
    }

    pub fn is_fetching(&self, kind: ViewKind) -> bool {
        match kind {
            ViewKind::Customers => self.customers.is_fetching(),
            ViewKind::Lockers => self.lockers.is_fetching(),
            ViewKind::Reservations => self.reservations.is_fetching(),
            ViewKind::Payments => self.payments.is_fetching(),
            ViewKind::Notifications => self.notifications.is_fetching(),
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut q = self.query(self.active).to_string();
        q.push(c);
        self.set_query(self.active, q);
    }

    pub fn pop_search_char(&mut self) {
        let mut q = self.query(self.active).to_string();
        if q.pop().is_some() {
            self.set_query(self.active, q);
        }
    }

    pub fn clear_search(&mut self) {
        self.set_query(self.active, String::new());
    }

    pub fn charts(&self) -> ChartSet {
        ChartSet::compute(
            self.stats.as_ref(),
            self.customers.records(),
            self.payments.records(),
        )
    }

    // ---- customer actions ----

    /// Id and active flag of the selected customer row.
    pub fn selected_customer(&self) -> Option<(i64, bool)> {
        if self.active != ViewKind::Customers {
            return None;
        }
        self.customers
            .visible_entry(self.selected())
            .map(|(_, c)| (c.id, c.active))
    }

    /// Id of the selected customer, for the edit pre-fetch.
    pub fn selected_customer_id(&self) -> Option<i64> {
        self.selected_customer().map(|(id, _)| id)
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(CustomerForm::create());
        self.mode = AppMode::Form;
    }

    /// Validate the open form. A valid form closes and yields its action;
    /// an invalid one stays open with the error shown inline.
    pub fn submit_form(&mut self) -> Option<CustomerAction> {
        let form = self.form.as_mut()?;
        match form.submit() {
            Ok(submission) => {
                self.form = None;
                self.mode = AppMode::Normal;
                Some(submission.into())
            }
            Err(e) => {
                form.error = Some(e);
                None
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = AppMode::Normal;
    }

    /// Toggle the selected customer's active flag. Deactivation asks first;
    /// activation is returned for immediate dispatch.
    pub fn request_toggle_active(&mut self) -> Option<CustomerAction> {
        if self.active != ViewKind::Customers {
            return None;
        }
        let (row, customer) = self.customers.visible_entry(self.selected())?;
        let id = customer.id;
        if row.has_action(ActionKind::Deactivate) {
            self.confirm = Some(PendingConfirm {
                prompt: "Are you sure you want to deactivate this customer?".to_string(),
                action: CustomerAction::Deactivate { id },
            });
            self.mode = AppMode::Confirm;
            None
        } else {
            Some(CustomerAction::Activate { id })
        }
    }

    /// Answer the pending confirmation. A "no" sends nothing.
    pub fn confirm(&mut self, yes: bool) -> Option<CustomerAction> {
        let pending = self.confirm.take()?;
        self.mode = AppMode::Normal;
        yes.then_some(pending.action)
    }

    pub fn dismiss_toast(&mut self) {
        self.toasts.dismiss_latest();
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.expire(now);
    }
}
