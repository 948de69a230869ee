use serde::{Deserialize, Serialize};

/// Stored occupancy of a spot. Reservation holds are layered on top at display
/// time and never written here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Open,
    Occupied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: String,
    pub section_id: String,
    pub status: SpotStatus,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub accessible: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ev: bool,
}

impl Spot {
    /// Builds the id for the 1-based `number`th spot of a section, e.g. `north-f-007`.
    pub fn make_id(section_id: &str, number: usize) -> String {
        format!("{}-{:03}", section_id, number)
    }

    /// Number encoded in the trailing `-NNN` segment of the id.
    pub fn number(&self) -> Option<u32> {
        self.id.rsplit('-').next()?.parse().ok()
    }

    pub fn is_open(&self) -> bool {
        self.status == SpotStatus::Open
    }
}
