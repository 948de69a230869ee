use super::clock::Clock;
use crate::models::Reservation;
use crate::storage::{load_json, save_json, KeyValueStore, RESERVATIONS_KEY};
use std::sync::Arc;

/// How long a hold lasts: 15 minutes.
pub const HOLD_DURATION_MS: i64 = 15 * 60 * 1000;

/// Short-lived spot holds, persisted in full after every change.
///
/// At most one reservation exists per spot id. Reserving a held spot replaces
/// the previous hold whoever owns it, and cancelling does not check ownership.
/// Ownership only decides what counts as "mine".
pub struct ReservationLedger {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    user_id: String,
    reservations: Vec<Reservation>,
}

impl ReservationLedger {
    /// Loads stored reservations, dropping any that have already expired.
    /// Missing or unreadable data starts an empty ledger.
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, user_id: String) -> Self {
        let stored: Vec<Reservation> = match load_json(store.as_ref(), RESERVATIONS_KEY) {
            Ok(Some(reservations)) => reservations,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to load reservations, starting empty: {}", e);
                Vec::new()
            }
        };

        let now = clock.now_millis();
        let total = stored.len();
        let reservations: Vec<Reservation> =
            stored.into_iter().filter(|r| r.is_active(now)).collect();

        tracing::info!(
            "Loaded {} reservations ({} expired dropped)",
            reservations.len(),
            total - reservations.len()
        );

        Self {
            store,
            clock,
            user_id,
            reservations,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Every stored reservation, including ones that expired since the last sweep.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Holds `spot_id` for the current user, replacing any existing hold on it.
    pub fn reserve(&mut self, spot_id: &str, lot_id: &str, section_id: &str) -> Reservation {
        let now = self.clock.now_millis();
        let superseded = self.remove_spot(spot_id);
        if let Some(previous) = &superseded {
            if !previous.is_held_by(&self.user_id) {
                tracing::warn!(
                    "Reservation on {} held by {:?} replaced by {}",
                    spot_id,
                    previous.reserved_by,
                    self.user_id
                );
            }
        }

        let reservation = Reservation {
            spot_id: spot_id.to_string(),
            lot_id: lot_id.to_string(),
            section_id: section_id.to_string(),
            reserved_at: now,
            expires_at: now + HOLD_DURATION_MS,
            reserved_by: Some(self.user_id.clone()),
        };
        self.reservations.push(reservation.clone());
        self.persist();

        tracing::info!("Reserved {} in {}/{}", spot_id, lot_id, section_id);
        reservation
    }

    /// Drops any reservation on `spot_id` and returns it.
    pub fn cancel(&mut self, spot_id: &str) -> Option<Reservation> {
        let removed = self.remove_spot(spot_id);
        self.persist();

        if removed.is_some() {
            tracing::info!("Cancelled reservation on {}", spot_id);
        }
        removed
    }

    /// The current user's unexpired reservation on `spot_id`.
    pub fn get_mine(&self, spot_id: &str) -> Option<&Reservation> {
        self.mine_at(spot_id, self.clock.now_millis())
    }

    pub fn mine_at(&self, spot_id: &str, now: i64) -> Option<&Reservation> {
        self.active_at(spot_id, now)
            .filter(|r| r.is_held_by(&self.user_id))
    }

    /// Anyone's unexpired reservation on `spot_id`.
    pub fn active_at(&self, spot_id: &str, now: i64) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.spot_id == spot_id && r.is_active(now))
    }

    /// All of the current user's unexpired reservations, soonest expiry first.
    pub fn all_mine(&self) -> Vec<&Reservation> {
        let now = self.clock.now_millis();
        let mut mine: Vec<&Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.is_active(now) && r.is_held_by(&self.user_id))
            .collect();
        mine.sort_by_key(|r| r.expires_at);
        mine
    }

    /// Removes every reservation whose expiry has passed and returns how many went.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_millis();
        let before = self.reservations.len();
        self.reservations.retain(|r| r.is_active(now));
        let removed = before - self.reservations.len();
        self.persist();

        if removed > 0 {
            tracing::info!("Swept {} expired reservations", removed);
        }
        removed
    }

    /// Drops every entry for `spot_id`. Stored data written elsewhere may hold
    /// more than one; the first of them is returned.
    fn remove_spot(&mut self, spot_id: &str) -> Option<Reservation> {
        let mut removed = None;
        self.reservations.retain(|r| {
            if r.spot_id != spot_id {
                return true;
            }
            if removed.is_none() {
                removed = Some(r.clone());
            }
            false
        });
        removed
    }

    // Write failures are logged; the in-memory ledger stays authoritative.
    fn persist(&self) {
        if let Err(e) = save_json(self.store.as_ref(), RESERVATIONS_KEY, &self.reservations) {
            tracing::error!("Failed to save reservations: {}", e);
        }
    }
}
