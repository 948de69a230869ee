use super::spot::{Spot, SpotStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Faculty,
    Student,
    PaidMeter,
    Open,
    Visitor,
    Accessible,
    Ev,
}

impl SectionType {
    pub fn label(&self) -> &'static str {
        match self {
            SectionType::Faculty => "Faculty",
            SectionType::Student => "Student",
            SectionType::PaidMeter => "Paid Meter",
            SectionType::Visitor => "Visitor",
            SectionType::Accessible => "Accessible",
            SectionType::Ev => "EV Charging",
            SectionType::Open => "Open",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub capacity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_capacity_for_demo: Option<i32>,
    pub available: i32,
    #[serde(default)]
    pub spots: Vec<Spot>,
}

impl Section {
    /// Capacity used for both variation and spot generation.
    pub fn effective_capacity(&self) -> i32 {
        match self.fake_capacity_for_demo {
            Some(capacity) if capacity > 0 => capacity,
            _ => self.capacity,
        }
    }

    pub fn open_spot_count(&self) -> usize {
        self.spots
            .iter()
            .filter(|s| s.status == SpotStatus::Open)
            .count()
    }

    pub fn find_spot(&self, spot_id: &str) -> Option<&Spot> {
        self.spots.iter().find(|s| s.id.eq_ignore_ascii_case(spot_id))
    }
}
