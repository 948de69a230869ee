//! Demo login gate. Any non-empty username and password are accepted; the
//! result only controls whether the console serves parking commands.

use crate::storage::{load_json, save_json, KeyValueStore, AUTH_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<String>,
}

pub struct AuthStore {
    store: Arc<dyn KeyValueStore>,
    state: AuthState,
}

impl AuthStore {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let state = match load_json(store.as_ref(), AUTH_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => AuthState::default(),
            Err(e) => {
                tracing::warn!("Failed to load login state, starting logged out: {}", e);
                AuthState::default()
            }
        };
        Self { store, state }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn user(&self) -> Option<&str> {
        self.state.user.as_deref()
    }

    /// Returns false, changing nothing, when either field is blank after trimming.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return false;
        }

        self.state = AuthState {
            is_authenticated: true,
            user: Some(username.to_string()),
        };
        self.persist();
        tracing::info!("{} logged in", username);
        true
    }

    pub fn logout(&mut self) {
        self.state = AuthState::default();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = save_json(self.store.as_ref(), AUTH_KEY, &self.state) {
            tracing::error!("Failed to save login state: {}", e);
        }
    }
}
