//! Background fetches and writes.
//!
//! Network work runs on spawned tasks and reports back over a channel, so
//! the draw loop never waits on the backend. Each event is applied to the
//! [`App`] on the loop's own task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use lockerdash_core::api::{Customer, Locker, Notification, Payment, Reservation, Stats};
use lockerdash_core::poller::Poller;
use lockerdash_core::{ApiClient, Result, ViewKind};

use crate::actions::{self, ActionOutcome, CustomerAction};
use crate::app::App;

/// Result of a background request.
#[derive(Debug)]
pub enum DashboardEvent {
    Customers(Result<Vec<Customer>>),
    Lockers(Result<Vec<Locker>>),
    Reservations(Result<Vec<Reservation>>),
    Payments(Result<Vec<Payment>>),
    Notifications(Result<Vec<Notification>>),
    Stats(Result<Stats>),
    /// Fresh record for the edit form.
    EditLoaded(Result<Customer>),
    ActionFinished(ActionOutcome),
}

/// Work requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh(ViewKind),
    LoadForEdit(i64),
    Run(CustomerAction),
}

/// Spawns requests against the backend and forwards their results.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<ApiClient>,
    tx: mpsc::Sender<DashboardEvent>,
}

impl Dispatcher {
    pub const fn new(api: Arc<ApiClient>, tx: mpsc::Sender<DashboardEvent>) -> Self {
        Self { api, tx }
    }

    /// Mark the view as fetching (for commands that need it) and spawn the work.
    pub fn execute(&self, app: &mut App, command: Command) {
        match command {
            Command::Refresh(kind) => {
                app.begin_fetch(kind);
                self.refresh(kind);
            }
            Command::LoadForEdit(id) => self.load_for_edit(id),
            Command::Run(action) => self.run(action),
        }
    }

    /// Fetch one list view.
    pub fn refresh(&self, kind: ViewKind) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            debug!(view = %kind, "fetching");
            let event = match kind {
                ViewKind::Customers => DashboardEvent::Customers(api.list_customers().await),
                ViewKind::Lockers => DashboardEvent::Lockers(api.list_lockers().await),
                ViewKind::Reservations => {
                    DashboardEvent::Reservations(api.list_reservations().await)
                }
                ViewKind::Payments => DashboardEvent::Payments(api.list_payments().await),
                ViewKind::Notifications => {
                    DashboardEvent::Notifications(api.list_notifications().await)
                }
            };
            send(&tx, event).await;
        });
    }

    pub fn load_for_edit(&self, id: i64) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            send(&tx, DashboardEvent::EditLoaded(api.get_customer(id).await)).await;
        });
    }

    pub fn run(&self, action: CustomerAction) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = actions::execute(&api, action).await;
            send(&tx, DashboardEvent::ActionFinished(outcome)).await;
        });
    }

    /// Poll the stats endpoint every `period`, starting now.
    pub fn start_stats_poller(&self, period: Duration) -> Poller {
        let api = self.api.clone();
        let tx = self.tx.clone();
        Poller::spawn(period, move || {
            let api = api.clone();
            let tx = tx.clone();
            async move {
                send(&tx, DashboardEvent::Stats(api.stats().await)).await;
            }
        })
    }
}

async fn send(tx: &mpsc::Sender<DashboardEvent>, event: DashboardEvent) {
    if tx.send(event).await.is_err() {
        warn!("dashboard event dropped: receiver closed");
    }
}
