use super::lock;
use crate::console::types::split_args;
use crate::AppState;
use anyhow::{bail, Result};
use std::sync::Arc;

/// Handle login - any non-empty username and password are accepted
pub fn handle_login(state: Arc<AppState>, args: &str) -> Result<()> {
    let parts = split_args(args);
    let (Some(username), Some(password)) = (parts.first(), parts.get(1)) else {
        bail!("Usage: `login <username> <password>`");
    };

    let mut auth = lock(&state.auth);
    if !auth.login(username, password) {
        bail!("Usage: `login <username> <password>`");
    }

    state.console.send(format!(
        "Welcome, {}! Type `lots` to see campus parking.",
        username
    ));
    Ok(())
}

pub fn handle_logout(state: Arc<AppState>, _args: &str) -> Result<()> {
    let mut auth = lock(&state.auth);
    if !auth.is_authenticated() {
        state.console.send("You are not logged in.");
        return Ok(());
    }

    auth.logout();
    state.console.send("Logged out.");
    Ok(())
}

pub fn handle_whoami(state: Arc<AppState>, _args: &str) -> Result<()> {
    let user_id = lock(&state.ledger).user_id().to_string();
    let auth = lock(&state.auth);

    let login = match auth.user() {
        Some(user) if auth.is_authenticated() => format!("Logged in as {}", user),
        _ => "Not logged in".to_string(),
    };
    state
        .console
        .send(format!("{}\nReservation id: {}", login, user_id));
    Ok(())
}
