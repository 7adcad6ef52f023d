//! lockerdash CLI
//!
//! Terminal admin console for the smart-locker backend.
//! Provides both TUI (ratatui) and headless snapshot modes.

use std::io;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use lockerdash_cli::headless::{self, Snapshot};
use lockerdash_cli::tui;
use lockerdash_core::config::{self, Config};
use lockerdash_core::tracing_init::{init_file_tracing, init_tracing};
use lockerdash_core::{ApiClient, ViewKind};

#[derive(Parser, Debug)]
#[command(name = "lockerdash")]
#[command(version, about = "Smart-locker admin dashboard", long_about = None)]
struct Cli {
    /// Backend root URL
    #[arg(long, env = "LOCKERDASH_API_URL")]
    api_url: Option<String>,

    /// Session cookie sent with every request (e.g. "session=...")
    #[arg(long, env = "LOCKERDASH_SESSION_COOKIE", hide_env_values = true)]
    session_cookie: Option<String>,

    /// Stats refresh period in seconds (also LOCKERDASH_POLL_SECS)
    #[arg(long)]
    poll_secs: Option<u64>,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive dashboard (default)
    Tui,
    /// Print one list view and exit
    List {
        /// customers, lockers, reservations, payments or notifications
        view: ViewKind,
        /// Case-insensitive substring filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print the dashboard counters and exit
    Stats,
}

impl Cli {
    /// Layer CLI flags over the resolved file/env configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(ref url) = self.api_url {
            config.api.base_url.clone_from(url);
        }
        if let Some(ref cookie) = self.session_cookie {
            config.api.session_cookie = Some(cookie.clone());
        }
        if let Some(secs) = self.poll_secs {
            config.dashboard.poll_interval_secs = secs;
        }
        if self.log_json {
            config.log.json = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config()?;
    cli.apply(&mut config);
    config.validate()?;

    // Use file-based tracing for TUI mode to avoid polluting terminal
    let command = cli.command.unwrap_or(Command::Tui);
    if matches!(command, Command::Tui) {
        let log_path = config::state_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("lockerdash.log");
        if let Err(e) = init_file_tracing("lockerdash=info", config.log.json, &log_path) {
            init_tracing("lockerdash=warn", config.log.json);
            warn!(path = %log_path.display(), error = %e, "Could not open log file");
        }
    } else {
        init_tracing("lockerdash=info", config.log.json);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting lockerdash");

    let api = ApiClient::new(&config.api)?;

    match command {
        Command::Tui => tui::run(api, &config).await?,
        Command::List { view, search } => {
            let mut out = io::stdout().lock();
            headless::run(&api, Snapshot::List { view, search }, &mut out).await?;
        }
        Command::Stats => {
            let mut out = io::stdout().lock();
            headless::run(&api, Snapshot::Stats, &mut out).await?;
        }
    }

    Ok(())
}
