use super::types::{LotDataError, LotDefinition};
use std::collections::HashSet;

/// Parse and validate a JSON array of lot definitions
pub fn parse_lot_definitions(content: &str) -> Result<Vec<LotDefinition>, LotDataError> {
    let definitions: Vec<LotDefinition> = serde_json::from_str(content)?;

    let mut lot_ids = HashSet::new();
    for lot in &definitions {
        if !lot_ids.insert(lot.id.as_str()) {
            return Err(LotDataError::DuplicateLot(lot.id.clone()));
        }
        if lot.capacity < 0 {
            return Err(LotDataError::NegativeCapacity(lot.id.clone()));
        }

        let mut section_ids = HashSet::new();
        for section in lot.sections.iter().flatten() {
            if !section_ids.insert(section.id.as_str()) {
                return Err(LotDataError::DuplicateSection {
                    lot: lot.id.clone(),
                    section: section.id.clone(),
                });
            }
            if section.capacity < 0 {
                return Err(LotDataError::NegativeCapacity(section.id.clone()));
            }
        }

        for zone in lot.zones.iter().flatten() {
            if zone.capacity < 0 {
                return Err(LotDataError::NegativeCapacity(zone.id.clone()));
            }
        }
    }

    Ok(definitions)
}
