use super::lock;
use crate::console::types::split_args;
use crate::models::{Lot, Section};
use crate::parking::status::{directions_url, format_percent};
use crate::parking::{availability_percent, AvailabilityStatus};
use crate::reservations::{display_status, format_countdown, section_available, ReservationLedger};
use crate::scoring::select_best;
use crate::AppState;
use anyhow::{bail, Result};
use std::sync::Arc;

/// Spots per row in the section grid
const GRID_WIDTH: usize = 10;

pub fn handle_lot(state: Arc<AppState>, args: &str) -> Result<()> {
    let key = args.trim();
    if key.is_empty() {
        bail!("Usage: `lot <id|code>`");
    }

    let mut parking = lock(&state.parking);
    let Some(lot) = parking.find_lot(key) else {
        bail!("Lot not found: `{}`", key);
    };

    let text = render_lot(lot);
    let lot_id = lot.id.clone();
    parking.select_lot(Some(&lot_id));
    state.console.send(text);
    Ok(())
}

pub fn handle_section(state: Arc<AppState>, args: &str) -> Result<()> {
    let parts = split_args(args);
    if parts.len() < 2 {
        bail!("Usage: `section <lot> <section>`");
    }

    let parking = lock(&state.parking);
    let Some((lot, section)) = parking.find_section(parts[0], parts[1]) else {
        bail!("Section not found: `{}` in `{}`", parts[1], parts[0]);
    };

    let ledger = lock(&state.ledger);
    state.console.send(render_section(lot, section, &ledger));
    Ok(())
}

fn render_lot(lot: &Lot) -> String {
    let pct = availability_percent(lot.available, lot.capacity);
    let mut out = format!(
        "*{}* ({})  {}\nAvailable: {} of {} ({})\nType: {}\n",
        lot.name,
        lot.code,
        AvailabilityStatus::for_lot(lot).label(),
        lot.available,
        lot.capacity,
        format_percent(pct),
        lot.lot_type.as_str()
    );

    let enforcement = lot.enforcement_hours.description(lot.is_24x7_restricted);
    if enforcement.is_empty() {
        out.push_str(&format!("Enforcement: {}\n", lot.enforcement_hours.label()));
    } else {
        out.push_str(&format!(
            "Enforcement: {} ({})\n",
            lot.enforcement_hours.label(),
            enforcement
        ));
    }

    if !lot.hours.is_empty() {
        out.push_str(&format!("Hours: {}\n", lot.hours));
    }
    out.push_str(&format!(
        "Metered: {}  Fall session: {}\n",
        yes_no(lot.is_metered),
        yes_no(lot.fall_session_allowed)
    ));
    if !lot.tags.is_empty() {
        let tags: Vec<&str> = lot.tags.iter().map(String::as_str).collect();
        out.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }
    if let Some(notes) = &lot.notes {
        out.push_str(&format!("Notes: {}\n", notes));
    }
    out.push_str(&format!("Directions: {}\n", directions_url(&lot.location)));

    if let Some(sections) = &lot.sections {
        out.push_str("Sections:\n");
        for section in sections {
            let best = select_best(&section.spots, lot, section)
                .map(|s| format!("best #{}", spot_number(&s.id)))
                .unwrap_or_else(|| "no open spots".to_string());
            out.push_str(&format!(
                "  {}  {} [{}]  {}/{} open  {}\n",
                section.id,
                section.label,
                section.section_type.label(),
                section.available,
                section.effective_capacity(),
                best
            ));
        }
    } else if let Some(zones) = &lot.zones {
        out.push_str("Zones:\n");
        for zone in zones {
            out.push_str(&format!(
                "  {}  {}  {}/{} open\n",
                zone.id, zone.label, zone.available, zone.capacity
            ));
        }
    }

    out.trim_end().to_string()
}

fn render_section(lot: &Lot, section: &Section, ledger: &ReservationLedger) -> String {
    let now = ledger.now();
    let mut out = format!(
        "*{}* - {} [{}]\n{} of {} spots available\n",
        lot.name,
        section.label,
        section.section_type.label(),
        section_available(section, ledger, now),
        section.spots.len()
    );

    for row in section.spots.chunks(GRID_WIDTH) {
        let line: String = row
            .iter()
            .map(|spot| display_status(spot, ledger, now).symbol())
            .collect();
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str("  . open  x occupied  r reserved  Y yours\n");

    match select_best(&section.spots, lot, section) {
        Some(best) => {
            let status = display_status(best, ledger, now);
            let mut line = format!("Best spot: #{} ({})", spot_number(&best.id), status.label());
            if best.accessible {
                line.push_str(", accessible");
            }
            if best.ev {
                line.push_str(", EV charging");
            }
            if let Some(mine) = ledger.mine_at(&best.id, now) {
                line.push_str(&format!(
                    ", {} remaining",
                    format_countdown(mine.seconds_remaining(now))
                ));
            }
            out.push_str(&line);
        }
        None => out.push_str("No open spots in this section."),
    }

    out
}

/// The trailing number of a spot id, e.g. `007` for `south-p-a-007`
pub(crate) fn spot_number(spot_id: &str) -> &str {
    spot_id.rsplit('-').next().unwrap_or(spot_id)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
