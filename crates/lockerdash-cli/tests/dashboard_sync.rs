//! End-to-end flows: key press -> dispatcher -> mock backend -> app state.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Value, json};
use tokio::sync::mpsc;

use lockerdash_cli::app::App;
use lockerdash_cli::sync::{Command, DashboardEvent, Dispatcher};
use lockerdash_cli::tui::handle_key;
use lockerdash_core::config::ApiConfig;
use lockerdash_core::{ApiClient, Severity, ViewKind};

#[derive(Default)]
struct Hits {
    list_customers: AtomicUsize,
    writes: AtomicUsize,
    stats: AtomicUsize,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Mock backend; PUT rejects any body whose email is "taken@x.com".
fn backend(hits: Arc<Hits>) -> Router {
    Router::new()
        .route(
            "/api/customers",
            get(|State(h): State<Arc<Hits>>| async move {
                h.list_customers.fetch_add(1, Ordering::SeqCst);
                Json(json!([
                    {"id": 1, "username": "ann", "email": "ann@x.com", "active": true},
                    {"id": 2, "username": "bo", "email": "bo@x.com", "active": false}
                ]))
            })
            .post(|State(h): State<Arc<Hits>>| async move {
                h.writes.fetch_add(1, Ordering::SeqCst);
                (StatusCode::CREATED, Json(json!({"id": 3})))
            }),
        )
        .route(
            "/api/customers/{id}",
            put(|State(h): State<Arc<Hits>>, Json(body): Json<Value>| async move {
                h.writes.fetch_add(1, Ordering::SeqCst);
                if body["email"] == "taken@x.com" {
                    (StatusCode::BAD_REQUEST, Json(json!({"error": "email taken"})))
                } else {
                    (StatusCode::OK, Json(json!({"message": "ok"})))
                }
            })
            .get(|| async {
                Json(json!({"id": 1, "username": "ann", "email": "ann@x.com", "active": true}))
            }),
        )
        .route(
            "/api/stats",
            get(|State(h): State<Arc<Hits>>| async move {
                h.stats.fetch_add(1, Ordering::SeqCst);
                Json(json!({"users": 2, "active_lockers": 1, "total_lockers": 3, "pending_payments": 0}))
            }),
        )
        .with_state(hits)
}

struct Harness {
    app: App,
    dispatcher: Dispatcher,
    rx: mpsc::Receiver<DashboardEvent>,
    hits: Arc<Hits>,
}

impl Harness {
    async fn new() -> Self {
        let hits = Arc::new(Hits::default());
        let base_url = serve(backend(hits.clone())).await;
        let api = ApiClient::new(&ApiConfig {
            base_url,
            session_cookie: None,
        })
        .unwrap();
        let (tx, rx) = mpsc::channel(16);
        Self {
            app: App::default(),
            dispatcher: Dispatcher::new(Arc::new(api), tx),
            rx,
            hits,
        }
    }

    fn press(&mut self, code: KeyCode) {
        if let Some(cmd) = handle_key(&mut self.app, KeyEvent::new(code, KeyModifiers::NONE)) {
            self.dispatcher.execute(&mut self.app, cmd);
        }
    }

    fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Apply the next background event, following any refetch it requests.
    async fn pump(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed");
        if let Some(kind) = self.app.handle_event(event) {
            self.dispatcher
                .execute(&mut self.app, Command::Refresh(kind));
        }
    }

    async fn load_customers(&mut self) {
        self.dispatcher
            .execute(&mut self.app, Command::Refresh(ViewKind::Customers));
        assert!(self.app.is_fetching(ViewKind::Customers));
        self.pump().await;
    }
}

#[tokio::test]
async fn successful_activate_refetches_customers_once() {
    let mut h = Harness::new().await;
    h.load_customers().await;
    assert_eq!(h.app.customers.rows().len(), 2);

    h.press(KeyCode::Down);
    h.press(KeyCode::Char('t'));
    h.pump().await; // action outcome
    h.pump().await; // refetch

    assert_eq!(h.hits.writes.load(Ordering::SeqCst), 1);
    assert_eq!(h.hits.list_customers.load(Ordering::SeqCst), 2);
    let toast = h.app.toasts.latest().unwrap();
    assert_eq!(toast.message, "Customer activated successfully");
    assert_eq!(toast.severity, Severity::Success);
}

#[tokio::test]
async fn successful_create_refetches_customers_once() {
    let mut h = Harness::new().await;
    h.load_customers().await;

    h.press(KeyCode::Char('n'));
    h.type_str("cy");
    h.press(KeyCode::Tab);
    h.type_str("cy@x.com");
    h.press(KeyCode::Tab);
    h.type_str("pw");
    h.press(KeyCode::Enter);
    h.pump().await; // action outcome
    h.pump().await; // refetch

    assert_eq!(h.hits.writes.load(Ordering::SeqCst), 1);
    assert_eq!(h.hits.list_customers.load(Ordering::SeqCst), 2);
    let toast = h.app.toasts.latest().unwrap();
    assert_eq!(toast.message, "Customer created successfully");
    assert_eq!(toast.severity, Severity::Success);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test]
async fn confirmed_deactivate_refetches_customers_once() {
    let mut h = Harness::new().await;
    h.load_customers().await;

    h.press(KeyCode::Char('t'));
    h.press(KeyCode::Char('y'));
    h.pump().await;
    h.pump().await;

    assert_eq!(h.hits.writes.load(Ordering::SeqCst), 1);
    assert_eq!(h.hits.list_customers.load(Ordering::SeqCst), 2);
    assert_eq!(
        h.app.toasts.latest().unwrap().message,
        "Customer deactivated successfully"
    );
}

#[tokio::test]
async fn rejected_edit_shows_server_error_without_refetch() {
    let mut h = Harness::new().await;
    h.load_customers().await;

    h.press(KeyCode::Char('e'));
    h.pump().await; // edit pre-fetch
    assert!(h.app.form.is_some());

    // Replace the email with a taken one.
    h.press(KeyCode::Tab);
    for _ in 0.."ann@x.com".len() {
        h.press(KeyCode::Backspace);
    }
    h.type_str("taken@x.com");
    h.press(KeyCode::Enter);
    h.pump().await;

    assert_eq!(h.hits.writes.load(Ordering::SeqCst), 1);
    let toast = h.app.toasts.latest().unwrap();
    assert_eq!(toast.message, "email taken");
    assert_eq!(toast.severity, Severity::Danger);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.rx.try_recv().is_err());
    assert_eq!(h.hits.list_customers.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn incomplete_create_sends_nothing() {
    let mut h = Harness::new().await;
    h.press(KeyCode::Char('n'));
    h.type_str("ann");
    h.press(KeyCode::Tab);
    h.type_str("ann@x.com");
    // Password left empty.
    h.press(KeyCode::Enter);
    h.press(KeyCode::Esc);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.rx.try_recv().is_err());
    assert_eq!(h.hits.writes.load(Ordering::SeqCst), 0);
    assert!(h.app.toasts.is_empty());
}

#[tokio::test]
async fn declined_deactivate_sends_nothing() {
    let mut h = Harness::new().await;
    h.load_customers().await;
    h.press(KeyCode::Char('t'));
    h.press(KeyCode::Char('n'));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.rx.try_recv().is_err());
    assert_eq!(h.hits.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stats_poller_fetches_immediately_and_on_schedule() {
    let mut h = Harness::new().await;
    let poller = h.dispatcher.start_stats_poller(Duration::from_millis(200));
    h.pump().await;
    assert_eq!(h.app.stats.map(|s| s.total_lockers), Some(3));
    h.pump().await;
    poller.cancel();
    assert!(h.hits.stats.load(Ordering::SeqCst) >= 2);
}
