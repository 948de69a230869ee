mod auth;
mod catalog;
mod config;
mod console;
mod handlers;
mod models;
mod parking;
mod reservations;
mod scoring;
mod simulation;
mod storage;

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::AuthStore;
use config::Config;
use console::{Console, ConsoleCommand};
use parking::ParkingStore;
use reservations::{ReservationLedger, SystemClock};
use simulation::StdRandom;
use storage::{FileStore, KeyValueStore, MemoryStore};

pub struct AppState {
    pub config: Config,
    /// Locked before `ledger` whenever both are needed
    pub parking: Mutex<ParkingStore>,
    pub ledger: Arc<Mutex<ReservationLedger>>,
    pub auth: Mutex<AuthStore>,
    pub console: Console,
    /// The running `watch` countdown, if any
    pub countdown: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new(
        config: Config,
        parking: ParkingStore,
        ledger: ReservationLedger,
        auth: AuthStore,
        console: Console,
    ) -> Self {
        Self {
            config,
            parking: Mutex::new(parking),
            ledger: Arc::new(Mutex::new(ledger)),
            auth: Mutex::new(auth),
            console,
            countdown: Mutex::new(None),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing; stdout belongs to the console
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "findmyspot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = Config::from_env().context("Failed to read configuration")?;

    let store = open_store(&config);

    let definitions = match &config.lots_file {
        Some(path) => {
            tracing::info!("Loading lots from {}", path.display());
            catalog::load_lot_file(path)
                .with_context(|| format!("Failed to load lots from {}", path.display()))?
        }
        None => catalog::BUILTIN_LOTS.to_vec(),
    };
    if definitions.is_empty() {
        tracing::warn!("No lot definitions loaded");
    }

    let parking = ParkingStore::initialize(&definitions, Box::new(StdRandom::from_entropy()));
    tracing::info!("Initialized {} lots", parking.lots().len());

    let user_id = reservations::load_or_create_user_id(store.as_ref());
    let ledger = ReservationLedger::load(store.clone(), Arc::new(SystemClock), user_id);
    let auth = AuthStore::load(store.clone());

    let (console, rx) = Console::channel();
    let writer = console::spawn_writer(rx);

    let state = Arc::new(AppState::new(config, parking, ledger, auth, console));
    let sweeper = reservations::spawn_sweeper(state.ledger.clone(), state.config.sweep_interval);

    if state.config.require_login && !handlers::lock(&state.auth).is_authenticated() {
        state
            .console
            .send("Welcome to FindMySpot. Log in with `login <username> <password>`.");
    } else {
        state
            .console
            .send("Welcome to FindMySpot. Type `help` for available commands.");
    }

    // Read commands until EOF or `quit`
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }
        handlers::handle_command(state.clone(), ConsoleCommand::new(line));
    }

    tracing::info!("Shutting down");
    sweeper.abort();
    if let Some(countdown) = handlers::lock(&state.countdown).take() {
        countdown.abort();
    }
    drop(state);
    if let Err(e) = writer.await {
        tracing::error!("Console writer task failed: {}", e);
    }

    Ok(())
}

/// File-backed storage under the data directory, or memory-only if it can't be opened
fn open_store(config: &Config) -> Arc<dyn KeyValueStore> {
    match FileStore::open(config.data_dir.clone()) {
        Ok(store) => {
            tracing::info!("Using data directory {}", store.dir().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(
                "Could not open data directory {}, reservations will not persist: {}",
                config.data_dir.display(),
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}
