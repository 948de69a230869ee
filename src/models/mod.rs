pub mod lot;
pub mod section;
pub mod spot;
pub mod reservation;

pub use lot::{Amenities, EnforcementHours, Location, Lot, LotType, Zone};
pub use reservation::Reservation;
pub use section::{Section, SectionType};
pub use spot::{Spot, SpotStatus};
