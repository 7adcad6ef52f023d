//! Two-thread TUI orchestration.
//!
//! Terminal I/O runs on a dedicated OS thread; all HTTP work stays on the
//! tokio runtime. Communication via `tokio::sync::mpsc` channels.

mod input;

pub use input::handle_key;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio_util::sync::CancellationToken;
use tracing::info;

use lockerdash_core::{ApiClient, Config, ToastQueue, ViewKind};

use crate::app::App;
use crate::sync::{Command, DashboardEvent, Dispatcher};
use crate::ui;

/// Terminal events forwarded from the UI reader thread.
pub enum TermEvent {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
}

/// Run the interactive dashboard.
///
/// Enters raw mode, spawns a dedicated terminal reader thread, loads every
/// list view, starts the stats poll, and runs the main `select!` loop until
/// the user quits.
pub async fn run(api: ApiClient, config: &Config) -> anyhow::Result<()> {
    // 1. Enter raw mode, create terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 2. Channels + cancellation token
    let cancel = CancellationToken::new();
    let (term_tx, mut term_rx) = tokio::sync::mpsc::channel::<TermEvent>(64);
    let (event_tx, mut event_rx) = tokio::sync::mpsc::channel::<DashboardEvent>(64);

    // 3. Spawn dedicated OS thread for crossterm::event::read()
    let cancel_clone = cancel.clone();
    let ui_thread = std::thread::spawn(move || {
        loop {
            if cancel_clone.is_cancelled() {
                break;
            }
            // Poll with 50ms timeout so we can check cancellation
            if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        // Filter out Release events (Windows emits Press + Release per keystroke)
                        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                            continue;
                        }
                        if term_tx.blocking_send(TermEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::Resize(w, h)) => {
                        if term_tx.blocking_send(TermEvent::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
    });

    // 4. Initial load of every view, then the stats poll
    let dispatcher = Dispatcher::new(Arc::new(api), event_tx);
    let mut app = App::new(ToastQueue::new(config.dashboard.toast_ttl()));
    for kind in ViewKind::ALL {
        dispatcher.execute(&mut app, Command::Refresh(kind));
    }
    let poller = dispatcher.start_stats_poller(config.dashboard.poll_interval());
    app.status = format!("Connected | {}", config.api.base_url);
    info!(base_url = %config.api.base_url, "dashboard started");

    let mut tick = tokio::time::interval(Duration::from_millis(50));

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            _ = tick.tick() => {
                app.expire_toasts(Instant::now());
                terminal.draw(|f| ui::draw(f, &app))?;
            }
            Some(term_event) = term_rx.recv() => {
                match term_event {
                    TermEvent::Key(key) => {
                        if let Some(command) = input::handle_key(&mut app, key) {
                            dispatcher.execute(&mut app, command);
                        }
                    }
                    TermEvent::Resize(_, _) => { /* terminal auto-handles resize on next draw */ }
                }
            }
            Some(event) = event_rx.recv() => {
                if let Some(kind) = app.handle_event(event) {
                    dispatcher.execute(&mut app, Command::Refresh(kind));
                }
            }
        }
        if app.should_quit {
            break Ok(());
        }
    };

    // 5. Shutdown: stop polling, signal UI thread to stop
    poller.cancel();
    cancel.cancel();
    let _ = ui_thread.join(); // fast: <50ms due to poll timeout

    // 6. Restore terminal
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}
