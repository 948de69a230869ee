use super::lock;
use crate::models::{Lot, SectionType};
use crate::parking::status::{directions_url, format_percent};
use crate::parking::{
    availability_percent, AvailabilityStatus, AvailabilityTier, LotFilters, ParkingStore, ViewMode,
};
use crate::AppState;
use anyhow::Result;
use std::sync::Arc;

pub fn handle_lots(state: Arc<AppState>, _args: &str) -> Result<()> {
    let parking = lock(&state.parking);
    state.console.send(render_lots(&parking));
    Ok(())
}

pub fn handle_search(state: Arc<AppState>, args: &str) -> Result<()> {
    let mut parking = lock(&state.parking);
    parking.set_search_query(args);
    state.console.send(render_lots(&parking));
    Ok(())
}

pub fn handle_filter(state: Arc<AppState>, args: &str) -> Result<()> {
    let mut parking = lock(&state.parking);
    let name = args.trim();

    if name.is_empty() {
        let active = parking.filters().active_names();
        let text = if active.is_empty() {
            "No filters active. Available: visitor, commuter, garage, ev, accessible, faculty".to_string()
        } else {
            format!("Active filters: {}", active.join(", "))
        };
        state.console.send(text);
        return Ok(());
    }

    // `filter=<name>` links only ever switch a filter on
    if name.starts_with("filter=") {
        let Some(preset) = LotFilters::from_preset(name) else {
            anyhow::bail!("Unknown filter link: `{}`", name);
        };
        parking.set_filter(preset, true);
    } else {
        let Some(filter) = LotFilters::from_filter_name(name) else {
            anyhow::bail!(
                "Unknown filter: `{}`. Use visitor, commuter, garage, ev, accessible or faculty.",
                name
            );
        };
        parking.toggle_filter(filter);
    }

    state.console.send(render_lots(&parking));
    Ok(())
}

pub fn handle_clear(state: Arc<AppState>, _args: &str) -> Result<()> {
    let mut parking = lock(&state.parking);
    parking.clear_filters();
    state.console.send(render_lots(&parking));
    Ok(())
}

pub fn handle_view(state: Arc<AppState>, args: &str) -> Result<()> {
    let Some(mode) = ViewMode::from_name(args) else {
        anyhow::bail!("Usage: `view <list|map>`");
    };
    let mut parking = lock(&state.parking);
    parking.set_view_mode(mode);
    state.console.send(format!("Switched to {} view.", mode.as_str()));
    state.console.send(render_lots(&parking));
    Ok(())
}

pub fn handle_map(state: Arc<AppState>, _args: &str) -> Result<()> {
    let mut parking = lock(&state.parking);
    parking.set_view_mode(ViewMode::Map);
    state.console.send(render_lots(&parking));
    Ok(())
}

pub fn handle_summary(state: Arc<AppState>, _args: &str) -> Result<()> {
    let parking = lock(&state.parking);
    let summary = parking.summary();
    state.console.send(format!(
        "Campus availability: {} of {} spots open across {} lots ({})",
        summary.total_available,
        summary.total_capacity,
        summary.lots,
        format_percent(summary.percent)
    ));
    Ok(())
}

pub fn handle_refresh(state: Arc<AppState>, _args: &str) -> Result<()> {
    let mut parking = lock(&state.parking);
    parking.refresh();
    let summary = parking.summary();
    state.console.send(format!(
        "Availability refreshed: {} of {} spots open ({})",
        summary.total_available,
        summary.total_capacity,
        format_percent(summary.percent)
    ));
    Ok(())
}

fn render_lots(parking: &ParkingStore) -> String {
    let lots = parking.filtered_lots();
    let mut out = String::new();

    let active = parking.filters().active_names();
    if !active.is_empty() || !parking.search_query().is_empty() {
        out.push_str(&format!(
            "Search: \"{}\"  Filters: {}\n",
            parking.search_query(),
            if active.is_empty() { "none".to_string() } else { active.join(", ") }
        ));
    }

    if lots.is_empty() {
        out.push_str("No lots found matching your criteria.");
        return out;
    }

    for lot in &lots {
        let line = match parking.view_mode() {
            ViewMode::List => list_line(lot),
            ViewMode::Map => map_line(lot),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!(
        "Showing {} of {} lots",
        lots.len(),
        parking.lots().len()
    ));
    out
}

fn list_line(lot: &Lot) -> String {
    let pct = availability_percent(lot.available, lot.capacity);
    let mut badges = vec![lot.lot_type.as_str()];
    if lot.has_section_type(SectionType::Faculty) {
        badges.push("Faculty");
    }
    if lot.has_section_type(SectionType::Student) {
        badges.push("Student");
    }
    if lot.amenities.ev {
        badges.push("EV");
    }
    if lot.amenities.accessible {
        badges.push("Accessible");
    }

    format!(
        "{} {} [{}] {}  {}/{} ({})  {}  {}",
        AvailabilityTier::from_percent(pct).symbol(),
        lot.name,
        lot.id,
        AvailabilityStatus::from_percent(pct).label(),
        lot.available,
        lot.capacity,
        format_percent(pct),
        badges.join(", "),
        lot.hours
    )
}

fn map_line(lot: &Lot) -> String {
    format!(
        "📍 {} [{}] at {:.4}, {:.4}  {} open  {}",
        lot.name,
        lot.id,
        lot.location.lat,
        lot.location.lng,
        lot.available,
        directions_url(&lot.location)
    )
}
