use crate::catalog::LotDefinition;
use crate::models::Lot;
use crate::simulation::{generate_spots, vary_availability, RandomSource};

/// Builds the live lot list from static definitions: applies defaults, varies
/// availability and generates spots for every section.
pub fn initialize_lots(definitions: &[LotDefinition], rng: &mut dyn RandomSource) -> Vec<Lot> {
    let mut lots: Vec<Lot> = definitions.iter().cloned().map(LotDefinition::into_lot).collect();
    for lot in &mut lots {
        simulate_lot(lot, rng);
    }

    tracing::info!(
        "Initialized {} lots ({} sections)",
        lots.len(),
        lots.iter().map(|l| l.sections.as_ref().map_or(0, Vec::len)).sum::<usize>()
    );
    lots
}

/// Re-runs the simulation over the current live state, so availability drifts
/// from one refresh to the next.
pub fn refresh_lots(lots: &mut [Lot], rng: &mut dyn RandomSource) {
    for lot in lots.iter_mut() {
        simulate_lot(lot, rng);
    }
    tracing::info!("Refreshed availability for {} lots", lots.len());
}

fn simulate_lot(lot: &mut Lot, rng: &mut dyn RandomSource) {
    if let Some(sections) = lot.sections.as_mut() {
        for section in sections.iter_mut() {
            let capacity = section.effective_capacity();
            section.available = vary_availability(section.available, capacity, rng);
            section.spots =
                generate_spots(&section.id, capacity, section.available, section.section_type, rng);

            tracing::debug!(
                "Section {}: {}/{} open",
                section.id,
                section.available,
                capacity
            );
        }

        // Never trust a stored aggregate for sectioned lots
        lot.available = lot.sections_available().unwrap_or_default();
        return;
    }

    // Lots without sections: the lot total and any legacy zones drift
    // independently. Zones are not rolled up into the lot total.
    lot.available = vary_availability(lot.available, lot.effective_capacity(), rng);
    if let Some(zones) = lot.zones.as_mut() {
        for zone in zones.iter_mut() {
            zone.available = vary_availability(zone.available, zone.capacity, rng);
        }
    }
}
