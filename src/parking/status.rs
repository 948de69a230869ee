use crate::models::{Location, Lot};

/// Share of `capacity` still available, rounded to a whole percent.
/// Returns `None` when capacity is zero or negative.
pub fn availability_percent(available: i32, capacity: i32) -> Option<u32> {
    if capacity <= 0 {
        return None;
    }
    let pct = (available.max(0) as f64 / capacity as f64 * 100.0).round();
    Some(pct as u32)
}

pub fn format_percent(pct: Option<u32>) -> String {
    match pct {
        Some(p) => format!("{}%", p),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Full,
    Limited,
    Open,
}

impl AvailabilityStatus {
    pub fn from_percent(pct: Option<u32>) -> Self {
        match pct {
            None | Some(0) => AvailabilityStatus::Full,
            Some(p) if p < 20 => AvailabilityStatus::Limited,
            Some(_) => AvailabilityStatus::Open,
        }
    }

    pub fn for_lot(lot: &Lot) -> Self {
        Self::from_percent(availability_percent(lot.available, lot.capacity))
    }

    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityStatus::Full => "Full",
            AvailabilityStatus::Limited => "Limited",
            AvailabilityStatus::Open => "Open",
        }
    }
}

/// Colour band used for the availability indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityTier {
    High,
    Medium,
    Low,
}

impl AvailabilityTier {
    pub fn from_percent(pct: Option<u32>) -> Self {
        match pct.unwrap_or(0) {
            p if p > 50 => AvailabilityTier::High,
            p if p > 20 => AvailabilityTier::Medium,
            _ => AvailabilityTier::Low,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AvailabilityTier::High => "●",
            AvailabilityTier::Medium => "◐",
            AvailabilityTier::Low => "○",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampusSummary {
    pub lots: usize,
    pub total_capacity: i32,
    pub total_available: i32,
    pub percent: Option<u32>,
}

impl CampusSummary {
    pub fn from_lots(lots: &[Lot]) -> Self {
        let total_capacity = lots.iter().map(|l| l.capacity).sum();
        let total_available = lots.iter().map(|l| l.available).sum();
        Self {
            lots: lots.len(),
            total_capacity,
            total_available,
            percent: availability_percent(total_available, total_capacity),
        }
    }
}

pub fn directions_url(location: &Location) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        location.lat, location.lng
    )
}
