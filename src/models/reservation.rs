use serde::{Deserialize, Serialize};

/// A short-lived hold on one spot. Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub spot_id: String,
    pub lot_id: String,
    pub section_id: String,
    pub reserved_at: i64,
    pub expires_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
}

impl Reservation {
    pub fn is_active(&self, now: i64) -> bool {
        self.expires_at > now
    }

    pub fn is_held_by(&self, user_id: &str) -> bool {
        self.reserved_by.as_deref() == Some(user_id)
    }

    /// Whole seconds left before expiry, never negative.
    pub fn seconds_remaining(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0) / 1000
    }
}
