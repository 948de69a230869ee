pub mod clock;
pub mod display;
pub mod identity;
pub mod ledger;
pub mod sweeper;

pub use clock::{Clock, SystemClock};
pub use display::{display_status, format_countdown, section_available, DisplayStatus};
pub use identity::{generate_user_id, load_or_create_user_id};
pub use ledger::{ReservationLedger, HOLD_DURATION_MS};
pub use sweeper::{spawn_sweeper, SWEEP_INTERVAL};

#[cfg(test)]
pub use clock::ManualClock;
