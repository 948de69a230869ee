use super::section::{Section, SectionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotType {
    Lot,
    Garage,
}

impl LotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotType::Lot => "Parking Lot",
            LotType::Garage => "Garage",
        }
    }
}

/// When parking rules are enforced at a lot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnforcementHours {
    #[serde(rename = "24/7")]
    AllHours,
    #[default]
    #[serde(rename = "evening_weekend")]
    EveningWeekend,
    #[serde(rename = "business_hours")]
    BusinessHours,
    #[serde(rename = "daytime")]
    Daytime,
    #[serde(rename = "none")]
    Unenforced,
}

impl EnforcementHours {
    pub fn label(&self) -> &'static str {
        match self {
            EnforcementHours::AllHours => "24/7 Restricted",
            EnforcementHours::EveningWeekend => "Evening/Weekend",
            EnforcementHours::BusinessHours => "Business Hours",
            EnforcementHours::Daytime => "Daytime",
            EnforcementHours::Unenforced => "No Enforcement",
        }
    }

    /// Longer explanation shown on the lot detail page. The 24/7 text depends on
    /// whether the lot is flagged as restricted at all times.
    pub fn description(&self, restricted_24x7: bool) -> &'static str {
        match self {
            EnforcementHours::AllHours if restricted_24x7 => "Enforced at all times",
            EnforcementHours::AllHours => "",
            EnforcementHours::EveningWeekend => "Available 4pm-7am Mon-Fri, All day Sat-Sun",
            EnforcementHours::Daytime => "Enforced Mon-Fri 7am-4pm",
            EnforcementHours::BusinessHours => "",
            EnforcementHours::Unenforced => "Public parking",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Amenities {
    pub ev: bool,
    pub accessible: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Legacy lot subdivision kept for older lot data. Zones are varied on refresh
/// but never rolled up into the lot's availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub label: String,
    pub capacity: i32,
    pub available: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub lot_type: LotType,
    pub capacity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_capacity_for_demo: Option<i32>,
    pub available: i32,
    pub tags: BTreeSet<String>,
    pub amenities: Amenities,
    pub hours: String,
    pub enforcement_hours: EnforcementHours,
    #[serde(rename = "is247Restricted")]
    pub is_24x7_restricted: bool,
    pub is_metered: bool,
    pub is_garage: bool,
    pub fall_session_allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<Zone>>,
}

impl Lot {
    /// Demo override when set to a positive value, nominal capacity otherwise.
    pub fn effective_capacity(&self) -> i32 {
        match self.fake_capacity_for_demo {
            Some(capacity) if capacity > 0 => capacity,
            _ => self.capacity,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_section_type(&self, section_type: SectionType) -> bool {
        self.sections
            .as_deref()
            .map(|sections| sections.iter().any(|s| s.section_type == section_type))
            .unwrap_or(false)
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.sections
            .as_deref()?
            .iter()
            .find(|s| s.id.eq_ignore_ascii_case(section_id))
    }

    /// Sum of section availability, or `None` when the lot has no sections.
    pub fn sections_available(&self) -> Option<i32> {
        self.sections
            .as_deref()
            .map(|sections| sections.iter().map(|s| s.available).sum())
    }
}
