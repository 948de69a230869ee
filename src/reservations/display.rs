use super::ledger::ReservationLedger;
use crate::models::{Section, Spot, SpotStatus};

/// What a spot looks like to the current user once holds are taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Open,
    Occupied,
    /// Held by someone else.
    Reserved,
    YourReservation,
}

impl DisplayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Open => "open",
            DisplayStatus::Occupied => "occupied",
            DisplayStatus::Reserved => "reserved",
            DisplayStatus::YourReservation => "your reservation",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            DisplayStatus::Open => '.',
            DisplayStatus::Occupied => 'x',
            DisplayStatus::Reserved => 'r',
            DisplayStatus::YourReservation => 'Y',
        }
    }

    /// Whether the current user could park here.
    pub fn is_usable(&self) -> bool {
        matches!(self, DisplayStatus::Open | DisplayStatus::YourReservation)
    }
}

pub fn display_status(spot: &Spot, ledger: &ReservationLedger, now: i64) -> DisplayStatus {
    if ledger.mine_at(&spot.id, now).is_some() {
        return DisplayStatus::YourReservation;
    }
    if ledger.active_at(&spot.id, now).is_some() {
        return DisplayStatus::Reserved;
    }
    match spot.status {
        SpotStatus::Open => DisplayStatus::Open,
        SpotStatus::Occupied => DisplayStatus::Occupied,
    }
}

/// Spots in the section that are open or held by the current user.
pub fn section_available(section: &Section, ledger: &ReservationLedger, now: i64) -> usize {
    section
        .spots
        .iter()
        .filter(|spot| display_status(spot, ledger, now).is_usable())
        .count()
}

/// `m:ss` rendering of a countdown in seconds.
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::clock::ManualClock;
    use crate::reservations::ledger::HOLD_DURATION_MS;
    use crate::storage::MemoryStore;
    use crate::models::SectionType;
    use std::sync::Arc;

    const START: i64 = 1_700_000_000_000;

    fn spot(id: &str, status: SpotStatus) -> Spot {
        Spot {
            id: id.to_string(),
            section_id: "sec".to_string(),
            status,
            accessible: false,
            ev: false,
        }
    }

    fn ledgers() -> (ReservationLedger, ReservationLedger) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::at(START));
        let mut theirs = ReservationLedger::load(store.clone(), clock.clone(), "user_them".into());
        theirs.reserve("sec-002", "lot", "sec");
        let mut mine = ReservationLedger::load(store, clock, "user_me".into());
        mine.reserve("sec-001", "lot", "sec");
        (mine, theirs)
    }

    #[test]
    fn test_display_status_layers_holds_over_spot_state() {
        let (mine, _) = ledgers();
        let a = spot("sec-001", SpotStatus::Open);
        let b = spot("sec-002", SpotStatus::Open);
        let c = spot("sec-003", SpotStatus::Occupied);
        let d = spot("sec-004", SpotStatus::Open);

        assert_eq!(display_status(&a, &mine, START), DisplayStatus::YourReservation);
        assert_eq!(display_status(&b, &mine, START), DisplayStatus::Reserved);
        assert_eq!(display_status(&c, &mine, START), DisplayStatus::Occupied);
        assert_eq!(display_status(&d, &mine, START), DisplayStatus::Open);

        // Once the holds lapse the stored status shows through again
        let later = START + HOLD_DURATION_MS;
        assert_eq!(display_status(&a, &mine, later), DisplayStatus::Open);
        assert_eq!(display_status(&b, &mine, later), DisplayStatus::Open);
    }

    #[test]
    fn test_section_available_counts_mine_but_not_theirs() {
        let (mine, _) = ledgers();
        let section = Section {
            id: "sec".to_string(),
            label: "Sec".to_string(),
            section_type: SectionType::Open,
            capacity: 4,
            fake_capacity_for_demo: None,
            available: 3,
            spots: vec![
                spot("sec-001", SpotStatus::Open),
                spot("sec-002", SpotStatus::Open),
                spot("sec-003", SpotStatus::Occupied),
                spot("sec-004", SpotStatus::Open),
            ],
        };
        assert_eq!(section_available(&section, &mine, START), 2);
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(900), "15:00");
        assert_eq!(format_countdown(61), "1:01");
        assert_eq!(format_countdown(9), "0:09");
        assert_eq!(format_countdown(-3), "0:00");
    }
}
