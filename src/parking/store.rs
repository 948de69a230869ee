use super::filters::{matches_search, LotFilters};
use super::fleet::{initialize_lots, refresh_lots};
use super::status::CampusSummary;
use crate::catalog::LotDefinition;
use crate::models::{Lot, Section};
use crate::simulation::RandomSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

impl ViewMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "list" => Some(ViewMode::List),
            "map" => Some(ViewMode::Map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Map => "map",
        }
    }
}

/// Owns the live lot tree and the browsing state around it.
///
/// The lot tree is only ever rewritten by [`ParkingStore::refresh`]; everything
/// else reads it.
pub struct ParkingStore {
    lots: Vec<Lot>,
    rng: Box<dyn RandomSource>,
    search_query: String,
    filters: LotFilters,
    view_mode: ViewMode,
    selected_lot: Option<String>,
}

impl ParkingStore {
    pub fn initialize(definitions: &[LotDefinition], mut rng: Box<dyn RandomSource>) -> Self {
        let lots = initialize_lots(definitions, rng.as_mut());
        Self {
            lots,
            rng,
            search_query: String::new(),
            filters: LotFilters::empty(),
            view_mode: ViewMode::default(),
            selected_lot: None,
        }
    }

    pub fn refresh(&mut self) {
        refresh_lots(&mut self.lots, self.rng.as_mut());
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Looks a lot up by id or code, ignoring case.
    pub fn find_lot(&self, key: &str) -> Option<&Lot> {
        let key = key.trim();
        self.lots
            .iter()
            .find(|l| l.id.eq_ignore_ascii_case(key) || l.code.eq_ignore_ascii_case(key))
    }

    pub fn find_section(&self, lot_key: &str, section_id: &str) -> Option<(&Lot, &Section)> {
        let lot = self.find_lot(lot_key)?;
        let section = lot.find_section(section_id)?;
        Some((lot, section))
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
    }

    pub fn filters(&self) -> LotFilters {
        self.filters
    }

    pub fn set_filter(&mut self, filter: LotFilters, enabled: bool) {
        self.filters.set(filter, enabled);
    }

    /// Flips a filter and returns whether it is now active.
    pub fn toggle_filter(&mut self, filter: LotFilters) -> bool {
        self.filters.toggle(filter);
        self.filters.contains(filter)
    }

    pub fn clear_filters(&mut self) {
        self.filters = LotFilters::empty();
        self.search_query.clear();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn selected_lot(&self) -> Option<&Lot> {
        self.selected_lot.as_deref().and_then(|id| self.find_lot(id))
    }

    pub fn select_lot(&mut self, lot_id: Option<&str>) {
        self.selected_lot = lot_id.map(str::to_string);
    }

    /// Lots passing both the search query and every active filter, in data order.
    pub fn filtered_lots(&self) -> Vec<&Lot> {
        self.lots
            .iter()
            .filter(|l| matches_search(l, &self.search_query) && self.filters.matches(l))
            .collect()
    }

    pub fn summary(&self) -> CampusSummary {
        CampusSummary::from_lots(&self.lots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BUILTIN_LOTS;
    use crate::simulation::StdRandom;

    fn store() -> ParkingStore {
        ParkingStore::initialize(&BUILTIN_LOTS, Box::new(StdRandom::seeded(5)))
    }

    #[test]
    fn test_find_lot_by_id_or_code() {
        let store = store();
        assert_eq!(store.find_lot("admin-garage").unwrap().code, "AG");
        assert_eq!(store.find_lot("ag").unwrap().id, "admin-garage");
        assert!(store.find_lot("nowhere").is_none());
    }

    #[test]
    fn test_find_section() {
        let store = store();
        let (lot, section) = store.find_section("SP", "south-p-acc").unwrap();
        assert_eq!(lot.id, "south-p");
        assert_eq!(section.label, "Accessible Row");
        assert!(store.find_section("south-p", "missing").is_none());
        assert!(store.find_section("stadium", "stadium-north").is_none());
    }

    #[test]
    fn test_search_and_filters_narrow_results() {
        let mut store = store();
        let all = store.filtered_lots().len();
        assert_eq!(all, store.lots().len());

        assert!(store.toggle_filter(LotFilters::GARAGE));
        let garages = store.filtered_lots();
        assert!(!garages.is_empty());
        assert!(garages.iter().all(|l| l.is_garage));

        store.set_search_query("health");
        let ids: Vec<&str> = store.filtered_lots().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["health-sciences-garage"]);

        assert!(!store.toggle_filter(LotFilters::GARAGE));
        store.clear_filters();
        assert_eq!(store.filtered_lots().len(), all);
        assert_eq!(store.search_query(), "");
    }

    #[test]
    fn test_refresh_keeps_lot_totals_consistent() {
        let mut store = store();
        for _ in 0..10 {
            store.refresh();
            for lot in store.lots() {
                if let Some(total) = lot.sections_available() {
                    assert_eq!(lot.available, total);
                }
            }
        }
    }

    #[test]
    fn test_selection_and_view_mode() {
        let mut store = store();
        assert!(store.selected_lot().is_none());
        store.select_lot(Some("gym-road"));
        assert_eq!(store.selected_lot().unwrap().name, "Gym Road Lot");
        store.select_lot(None);
        assert!(store.selected_lot().is_none());

        assert_eq!(store.view_mode(), ViewMode::List);
        store.set_view_mode(ViewMode::from_name("MAP").unwrap());
        assert_eq!(store.view_mode(), ViewMode::Map);
    }

    #[test]
    fn test_summary_guards_empty_campus() {
        let store = ParkingStore::initialize(&[], Box::new(StdRandom::seeded(1)));
        let summary = store.summary();
        assert_eq!(summary.lots, 0);
        assert_eq!(summary.percent, None);
    }
}
