use crate::models::{Lot, LotType, SectionType};

bitflags::bitflags! {
    /// Active lot filters. Every set flag must match; an empty set matches all lots.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct LotFilters: u8 {
        const VISITOR    = 1 << 0;
        const COMMUTER   = 1 << 1;
        const GARAGE     = 1 << 2;
        const EV         = 1 << 3;
        const ACCESSIBLE = 1 << 4;
        const FACULTY    = 1 << 5;
    }
}

impl LotFilters {
    pub const NAMES: [(&'static str, LotFilters); 6] = [
        ("visitor", LotFilters::VISITOR),
        ("commuter", LotFilters::COMMUTER),
        ("garage", LotFilters::GARAGE),
        ("ev", LotFilters::EV),
        ("accessible", LotFilters::ACCESSIBLE),
        ("faculty", LotFilters::FACULTY),
    ];

    /// Looks up a filter by its lowercase console name, e.g. `ev`.
    pub fn from_filter_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, flag)| *flag)
    }

    /// Filters that may be switched on from a `filter=<name>` link.
    pub fn from_preset(param: &str) -> Option<Self> {
        let param = param.trim();
        let value = param.strip_prefix("filter=").unwrap_or(param);
        match value.to_lowercase().as_str() {
            "commuter" => Some(LotFilters::COMMUTER),
            "visitor" => Some(LotFilters::VISITOR),
            "faculty" => Some(LotFilters::FACULTY),
            _ => None,
        }
    }

    pub fn active_names(&self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn matches(&self, lot: &Lot) -> bool {
        (!self.contains(LotFilters::VISITOR) || lot.has_tag("visitor"))
            && (!self.contains(LotFilters::COMMUTER) || lot.has_tag("commuter"))
            && (!self.contains(LotFilters::GARAGE) || lot.lot_type == LotType::Garage)
            && (!self.contains(LotFilters::EV) || lot.amenities.ev)
            && (!self.contains(LotFilters::ACCESSIBLE) || lot.amenities.accessible)
            && (!self.contains(LotFilters::FACULTY) || lot.has_section_type(SectionType::Faculty))
    }
}

/// Case-insensitive substring match on name, code or any tag. An empty query matches.
pub fn matches_search(lot: &Lot, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    lot.name.to_lowercase().contains(&query)
        || lot.code.to_lowercase().contains(&query)
        || lot.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
}
