pub mod filters;
pub mod fleet;
pub mod status;
pub mod store;

pub use filters::{matches_search, LotFilters};
pub use fleet::{initialize_lots, refresh_lots};
pub use status::{availability_percent, AvailabilityStatus, AvailabilityTier, CampusSummary};
pub use store::{ParkingStore, ViewMode};
