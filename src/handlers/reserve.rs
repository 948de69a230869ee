use super::lot::spot_number;
use super::{local_time, lock};
use crate::console::types::split_args;
use crate::console::Console;
use crate::models::{Section, Spot};
use crate::reservations::{display_status, format_countdown, ReservationLedger};
use crate::scoring::select_best;
use crate::AppState;
use anyhow::{bail, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Countdown messages are printed on whole minutes and for the final seconds
const FINAL_SECONDS: i64 = 10;

pub fn handle_best(state: Arc<AppState>, args: &str) -> Result<()> {
    let parts = split_args(args);
    if parts.len() < 2 {
        bail!("Usage: `best <lot> <section>`");
    }

    let parking = lock(&state.parking);
    let Some((lot, section)) = parking.find_section(parts[0], parts[1]) else {
        bail!("Section not found: `{}` in `{}`", parts[1], parts[0]);
    };

    let text = match select_best(&section.spots, lot, section) {
        Some(best) => {
            let ledger = lock(&state.ledger);
            format!(
                "Best spot in {} {}: #{} ({})",
                lot.name,
                section.label,
                spot_number(&best.id),
                display_status(best, &ledger, ledger.now()).label()
            )
        }
        None => format!("No open spots in {} {}.", lot.name, section.label),
    };
    state.console.send(text);
    Ok(())
}

/// `reserve <lot> <section>` toggles a hold on the best spot;
/// `reserve <lot> <section> <spot>` holds a specific one.
pub fn handle_reserve(state: Arc<AppState>, args: &str) -> Result<()> {
    let parts = split_args(args);
    if parts.len() < 2 {
        bail!("Usage: `reserve <lot> <section> [spot]`");
    }

    let parking = lock(&state.parking);
    let Some((lot, section)) = parking.find_section(parts[0], parts[1]) else {
        bail!("Section not found: `{}` in `{}`", parts[1], parts[0]);
    };
    let mut ledger = lock(&state.ledger);

    let Some(spot_arg) = parts.get(2) else {
        let Some(best) = select_best(&section.spots, lot, section) else {
            state
                .console
                .send(format!("No open spots in {} {}.", lot.name, section.label));
            return Ok(());
        };

        if ledger.get_mine(&best.id).is_some() {
            ledger.cancel(&best.id);
            state.console.send(format!(
                "Cancelled your reservation on spot #{}.",
                spot_number(&best.id)
            ));
            return Ok(());
        }

        let text = hold_spot(&mut ledger, best, &lot.id, section);
        state.console.send(text);
        return Ok(());
    };

    let Some(spot) = find_spot(section, spot_arg) else {
        bail!("Spot not found: `{}` in {}", spot_arg, section.label);
    };
    if !spot.is_open() {
        bail!("Spot #{} is occupied.", spot_number(&spot.id));
    }

    if let Some(mine) = ledger.get_mine(&spot.id) {
        state.console.send(format!(
            "You already hold spot #{} ({} remaining).",
            spot_number(&spot.id),
            format_countdown(mine.seconds_remaining(ledger.now()))
        ));
        return Ok(());
    }

    let text = hold_spot(&mut ledger, spot, &lot.id, section);
    state.console.send(text);
    Ok(())
}

pub fn handle_cancel(state: Arc<AppState>, args: &str) -> Result<()> {
    let spot_id = args.trim();
    if spot_id.is_empty() {
        bail!("Usage: `cancel <spot>`");
    }

    let mut ledger = lock(&state.ledger);
    let text = match ledger.cancel(spot_id) {
        Some(r) if r.is_held_by(ledger.user_id()) => {
            format!("Cancelled your reservation on {}.", r.spot_id)
        }
        Some(r) => format!(
            "Cancelled reservation on {} (held by another user).",
            r.spot_id
        ),
        None => format!("No reservation on `{}`.", spot_id),
    };
    state.console.send(text);
    Ok(())
}

pub fn handle_mine(state: Arc<AppState>, _args: &str) -> Result<()> {
    let ledger = lock(&state.ledger);
    let mine = ledger.all_mine();
    if mine.is_empty() {
        state.console.send("You have no active reservations.");
        return Ok(());
    }

    let now = ledger.now();
    let mut out = format!("*Your reservations* ({})\n", mine.len());
    for r in mine {
        out.push_str(&format!(
            "• {} in {}/{}  {} remaining (until {})\n",
            r.spot_id,
            r.lot_id,
            r.section_id,
            format_countdown(r.seconds_remaining(now)),
            local_time(r.expires_at)
        ));
    }
    state.console.send(out.trim_end());
    Ok(())
}

/// Follows one of the user's reservations with a once-a-second countdown.
/// Defaults to the reservation that expires soonest.
pub fn handle_watch(state: Arc<AppState>, args: &str) -> Result<()> {
    let spot_id = {
        let ledger = lock(&state.ledger);
        let requested = args.trim();
        let reservation = if requested.is_empty() {
            ledger.all_mine().into_iter().next()
        } else {
            ledger.get_mine(requested)
        };
        let Some(reservation) = reservation else {
            if requested.is_empty() {
                bail!("You have no active reservations to watch.");
            }
            bail!("You have no reservation on `{}`.", requested);
        };
        state.console.send(format!(
            "Watching {}: {} remaining.",
            reservation.spot_id,
            format_countdown(reservation.seconds_remaining(ledger.now()))
        ));
        reservation.spot_id.clone()
    };

    let handle = spawn_countdown(state.ledger.clone(), state.console.clone(), spot_id);
    if let Some(previous) = lock(&state.countdown).replace(handle) {
        previous.abort();
    }
    Ok(())
}

pub fn handle_unwatch(state: Arc<AppState>, _args: &str) -> Result<()> {
    match lock(&state.countdown).take() {
        Some(handle) if !handle.is_finished() => {
            handle.abort();
            state.console.send("Stopped watching.");
        }
        _ => state.console.send("Not watching any reservation."),
    }
    Ok(())
}

fn hold_spot(ledger: &mut ReservationLedger, spot: &Spot, lot_id: &str, section: &Section) -> String {
    let reservation = ledger.reserve(&spot.id, lot_id, &section.id);
    format!(
        "Reserved spot #{} in {} until {} ({} remaining).",
        spot_number(&spot.id),
        section.label,
        local_time(reservation.expires_at),
        format_countdown(reservation.seconds_remaining(ledger.now()))
    )
}

/// Accepts a full spot id or just its number within the section.
fn find_spot<'a>(section: &'a Section, arg: &str) -> Option<&'a Spot> {
    section.find_spot(arg).or_else(|| {
        let number = arg.trim_start_matches('#').parse::<usize>().ok()?;
        section.find_spot(&Spot::make_id(&section.id, number))
    })
}

fn spawn_countdown(
    ledger: Arc<Mutex<ReservationLedger>>,
    console: Console,
    spot_id: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let remaining = {
                let ledger = lock(&ledger);
                ledger
                    .get_mine(&spot_id)
                    .map(|r| r.seconds_remaining(ledger.now()))
            };

            match remaining {
                Some(secs) if secs > 0 => {
                    if secs % 60 == 0 || secs <= FINAL_SECONDS {
                        console.send(format!(
                            "{} remaining on {}",
                            format_countdown(secs),
                            spot_id
                        ));
                    }
                }
                _ => {
                    console.send(format!("Reservation on {} has ended.", spot_id));
                    tracing::debug!("Countdown for {} finished", spot_id);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::super::lock;
    use crate::models::SpotStatus;
    use crate::scoring::select_best;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    const FIFTEEN_MINUTES: i64 = 15 * 60 * 1000;

    fn best_spot_id(h: &Harness) -> String {
        let parking = lock(&h.state.parking);
        let (lot, section) = parking.find_section("gym-road", "gym-road-acc").unwrap();
        select_best(&section.spots, lot, section).unwrap().id.clone()
    }

    fn occupied_spot_id(h: &Harness) -> String {
        let parking = lock(&h.state.parking);
        let (_, section) = parking.find_section("gym-road", "gym-road-acc").unwrap();
        section
            .spots
            .iter()
            .find(|s| s.status == SpotStatus::Occupied)
            .unwrap()
            .id
            .clone()
    }

    #[test]
    fn test_best_reports_top_spot() {
        let mut h = Harness::new(false);
        let best = best_spot_id(&h);
        let out = h.run("best gym-road gym-road-acc");
        assert!(out.starts_with("Best spot in Gym Road Lot Accessible: #"));
        assert!(out.contains(best.rsplit('-').next().unwrap()));
        assert!(out.ends_with("(open)"));
        assert!(h.run("best gym-road").starts_with("Error: Usage"));
    }

    #[test]
    fn test_reserve_best_spot_toggles() {
        let mut h = Harness::new(false);
        let best = best_spot_id(&h);

        let out = h.run("reserve gym-road gym-road-acc");
        assert!(out.starts_with("Reserved spot #"));
        assert!(out.contains("(15:00 remaining)"));
        assert_eq!(lock(&h.state.ledger).all_mine()[0].spot_id, best);

        let out = h.run("reserve GR gym-road-acc");
        assert!(out.starts_with("Cancelled your reservation"));
        assert!(lock(&h.state.ledger).all_mine().is_empty());
    }

    #[test]
    fn test_reserve_specific_spot() {
        let mut h = Harness::new(false);
        let best = best_spot_id(&h);
        let number = best.rsplit('-').next().unwrap().to_string();

        assert!(h
            .run(&format!("reserve gym-road gym-road-acc {}", number))
            .starts_with("Reserved spot #"));

        h.clock.advance(60_000);
        let out = h.run(&format!("reserve gym-road gym-road-acc {}", best));
        assert!(out.contains("You already hold spot"));
        assert!(out.contains("14:00 remaining"));
        assert_eq!(lock(&h.state.ledger).all_mine().len(), 1);
    }

    #[test]
    fn test_reserve_rejects_occupied_and_unknown_spots() {
        let mut h = Harness::new(false);
        let occupied = occupied_spot_id(&h);
        let out = h.run(&format!("reserve gym-road gym-road-acc {}", occupied));
        assert!(out.starts_with("Error: Spot #"));
        assert!(out.ends_with("is occupied."));

        assert!(h
            .run("reserve gym-road gym-road-acc 999")
            .starts_with("Error: Spot not found"));
        assert!(h
            .run("reserve gym-road nowhere")
            .starts_with("Error: Section not found"));
        assert!(lock(&h.state.ledger).reservations().is_empty());
    }

    #[test]
    fn test_mine_and_cancel() {
        let mut h = Harness::new(false);
        assert_eq!(h.run("mine"), "You have no active reservations.");

        let best = best_spot_id(&h);
        h.run("reserve gym-road gym-road-acc");
        h.clock.advance(5 * 60 * 1000);
        let out = h.run("mine");
        assert!(out.contains(&format!("• {} in gym-road/gym-road-acc  10:00 remaining", best)));

        assert_eq!(
            h.run(&format!("cancel {}", best)),
            format!("Cancelled your reservation on {}.", best)
        );
        assert_eq!(h.run("cancel nope-001"), "No reservation on `nope-001`.");
    }

    #[test]
    fn test_expired_reservation_is_not_mine() {
        let mut h = Harness::new(false);
        h.run("reserve gym-road gym-road-acc");
        h.clock.advance(FIFTEEN_MINUTES);
        assert_eq!(h.run("mine"), "You have no active reservations.");
    }

    #[test]
    fn test_other_users_hold_shows_as_reserved() {
        let store = Arc::new(MemoryStore::new());
        let mut other = Harness::with_user(false, "user_other", store.clone());
        let best = best_spot_id(&other);
        other.run("reserve gym-road gym-road-acc");

        let mut h = Harness::with_user(false, "user_me", store);
        assert!(h.run("best gym-road gym-road-acc").ends_with("(reserved)"));
        let grid = h.run("section gym-road gym-road-acc");
        assert!(grid
            .lines()
            .any(|l| l.starts_with("  ") && !l.contains("open") && l.contains('r')));
        assert_eq!(h.run("mine"), "You have no active reservations.");

        assert_eq!(
            h.run(&format!("cancel {}", best)),
            format!("Cancelled reservation on {} (held by another user).", best)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_counts_down_until_expiry() {
        let mut h = Harness::new(false);
        let best = best_spot_id(&h);
        h.run("reserve gym-road gym-road-acc");

        let out = h.run("watch");
        assert_eq!(out, format!("Watching {}: 15:00 remaining.", best));

        // First tick fires immediately
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(h.drain(), format!("15:00 remaining on {}", best));

        h.clock.advance(FIFTEEN_MINUTES - 3_000);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(h.drain(), format!("0:03 remaining on {}", best));

        h.clock.advance(3_000);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(h.drain(), format!("Reservation on {} has ended.", best));

        assert_eq!(h.run("unwatch"), "Not watching any reservation.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unwatch_stops_countdown() {
        let mut h = Harness::new(false);
        h.run("reserve gym-road gym-road-acc");
        h.run("watch");
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.drain();

        assert_eq!(h.run("unwatch"), "Stopped watching.");
        h.clock.advance(FIFTEEN_MINUTES);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(h.drain(), "");
    }

    #[test]
    fn test_watch_requires_a_reservation() {
        let mut h = Harness::new(false);
        assert!(h
            .run("watch")
            .starts_with("Error: You have no active reservations"));
        assert!(h
            .run("watch gym-road-acc-001")
            .starts_with("Error: You have no reservation on"));
    }
}
