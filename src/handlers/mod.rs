mod account;
mod lot;
mod lots;
mod reserve;

use crate::console::ConsoleCommand;
use crate::AppState;
use std::sync::{Arc, Mutex, MutexGuard};

/// Commands that work before logging in
const OPEN_COMMANDS: &[&str] = &["", "help", "login", "whoami"];

/// Main handler for every console command
pub fn handle_command(state: Arc<AppState>, command: ConsoleCommand) {
    tracing::debug!("Received command: {}", command.text);

    let (subcommand, args) = command.parse_subcommand();
    let subcommand = subcommand.to_lowercase();

    if state.config.require_login
        && !OPEN_COMMANDS.contains(&subcommand.as_str())
        && !lock(&state.auth).is_authenticated()
    {
        state
            .console
            .send("Please log in first: `login <username> <password>`");
        return;
    }

    let result = match subcommand.as_str() {
        "lots" | "ls" => lots::handle_lots(state.clone(), args),
        "search" => lots::handle_search(state.clone(), args),
        "filter" => lots::handle_filter(state.clone(), args),
        "clear" => lots::handle_clear(state.clone(), args),
        "view" => lots::handle_view(state.clone(), args),
        "map" => lots::handle_map(state.clone(), args),
        "summary" => lots::handle_summary(state.clone(), args),
        "refresh" => lots::handle_refresh(state.clone(), args),
        "lot" => lot::handle_lot(state.clone(), args),
        "section" | "spots" => lot::handle_section(state.clone(), args),
        "best" => reserve::handle_best(state.clone(), args),
        "reserve" => reserve::handle_reserve(state.clone(), args),
        "cancel" => reserve::handle_cancel(state.clone(), args),
        "mine" => reserve::handle_mine(state.clone(), args),
        "watch" => reserve::handle_watch(state.clone(), args),
        "unwatch" => reserve::handle_unwatch(state.clone(), args),
        "login" => account::handle_login(state.clone(), args),
        "logout" => account::handle_logout(state.clone(), args),
        "whoami" => account::handle_whoami(state.clone(), args),
        "" | "help" => handle_help(state.clone()),
        _ => Err(anyhow::anyhow!(
            "Unknown command: `{}`. Type `help` for available commands.",
            subcommand
        )),
    };

    if let Err(e) = result {
        tracing::error!("Error handling command: {}", e);
        state.console.send(format!("Error: {}", e));
    }
}

fn handle_help(state: Arc<AppState>) -> anyhow::Result<()> {
    let help_text = r#"*FindMySpot Commands*

• `lots` - List lots matching the current search and filters
• `search <text>` - Search lots by name, code or tag (`search` alone clears it)
• `filter <visitor|commuter|garage|ev|accessible|faculty>` - Toggle a filter
• `clear` - Clear search and filters
• `view <list|map>` / `map` - Switch between list and map views
• `lot <id|code>` - Show lot details and sections
• `section <lot> <section>` - Show the spot grid for a section
• `best <lot> <section>` - Show the recommended spot
• `reserve <lot> <section> [spot]` - Hold a spot for 15 minutes (best spot toggles)
• `cancel <spot>` - Cancel a reservation
• `mine` - List your reservations
• `watch <spot>` / `unwatch` - Follow the countdown on your reservation
• `refresh` - Refresh availability
• `summary` - Campus-wide availability
• `login <username> <password>` / `logout` / `whoami`
• `quit` - Exit"#;

    state.console.send(help_text);
    Ok(())
}

/// Lock a shared store, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Format a millisecond timestamp as local wall-clock time
pub(crate) fn local_time(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::auth::AuthStore;
    use crate::catalog::BUILTIN_LOTS;
    use crate::config::Config;
    use crate::console::{Console, ConsoleCommand};
    use crate::parking::ParkingStore;
    use crate::reservations::{ManualClock, ReservationLedger};
    use crate::simulation::StdRandom;
    use crate::storage::MemoryStore;
    use crate::AppState;
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    pub const START: i64 = 1_700_000_000_000;

    pub struct Harness {
        pub state: Arc<AppState>,
        pub clock: Arc<ManualClock>,
        pub store: Arc<MemoryStore>,
        rx: UnboundedReceiver<String>,
    }

    impl Harness {
        pub fn new(require_login: bool) -> Self {
            Self::with_user(require_login, "user_me", Arc::new(MemoryStore::new()))
        }

        pub fn with_user(require_login: bool, user: &str, store: Arc<MemoryStore>) -> Self {
            let clock = Arc::new(ManualClock::at(START));
            let config = Config {
                require_login,
                ..Config::default()
            };
            let parking = ParkingStore::initialize(&BUILTIN_LOTS, Box::new(StdRandom::seeded(8)));
            let ledger = ReservationLedger::load(store.clone(), clock.clone(), user.to_string());
            let auth = AuthStore::load(store.clone());
            let (console, rx) = Console::channel();

            Self {
                state: Arc::new(AppState::new(config, parking, ledger, auth, console)),
                clock,
                store,
                rx,
            }
        }

        /// Run a command and return everything it printed
        pub fn run(&mut self, line: &str) -> String {
            super::handle_command(self.state.clone(), ConsoleCommand::new(line));
            self.drain()
        }

        pub fn drain(&mut self) -> String {
            let mut out = Vec::new();
            while let Ok(text) = self.rx.try_recv() {
                out.push(text);
            }
            out.join("\n")
        }
    }
}
