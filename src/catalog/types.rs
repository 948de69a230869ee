use crate::models::{Amenities, EnforcementHours, Location, Lot, LotType, Section, Zone};
use serde::Deserialize;

/// A lot as written in the static data file. Optional fields are filled in by
/// [`LotDefinition::into_lot`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotDefinition {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub lot_type: LotType,
    pub capacity: i32,
    #[serde(default)]
    pub fake_capacity_for_demo: Option<i32>,
    pub available: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub enforcement_hours: Option<EnforcementHours>,
    #[serde(default, rename = "is247Restricted")]
    pub is_24x7_restricted: Option<bool>,
    #[serde(default)]
    pub is_metered: Option<bool>,
    #[serde(default)]
    pub is_garage: Option<bool>,
    #[serde(default)]
    pub fall_session_allowed: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    pub location: Location,
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
    #[serde(default)]
    pub zones: Option<Vec<Zone>>,
}

impl LotDefinition {
    /// Applies defaults for every optional flag. Sections and zones are copied
    /// as-is; occupancy is simulated afterwards.
    pub fn into_lot(self) -> Lot {
        let is_garage = self.is_garage.unwrap_or(self.lot_type == LotType::Garage);
        Lot {
            id: self.id,
            code: self.code,
            name: self.name,
            lot_type: self.lot_type,
            capacity: self.capacity,
            fake_capacity_for_demo: self.fake_capacity_for_demo,
            available: self.available,
            tags: self.tags.into_iter().collect(),
            amenities: self.amenities,
            hours: self.hours,
            enforcement_hours: self.enforcement_hours.unwrap_or_default(),
            is_24x7_restricted: self.is_24x7_restricted.unwrap_or(false),
            is_metered: self.is_metered.unwrap_or(false),
            is_garage,
            fall_session_allowed: self.fall_session_allowed.unwrap_or(false),
            notes: self.notes,
            location: self.location,
            sections: self.sections,
            zones: self.zones,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LotDataError {
    #[error("Failed to read lot data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid lot data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate lot id: {0}")]
    DuplicateLot(String),

    #[error("Duplicate section id '{section}' in lot '{lot}'")]
    DuplicateSection { lot: String, section: String },

    #[error("Negative capacity for '{0}'")]
    NegativeCapacity(String),
}
