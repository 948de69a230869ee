use super::rng::RandomSource;
use crate::models::{SectionType, Spot, SpotStatus};

/// Spots at the front of every non-accessible section that are marked accessible.
pub const ACCESSIBLE_QUOTA: usize = 10;

/// Builds a fresh spot list for a section with exactly `available` open spots.
///
/// Occupied positions are chosen uniformly without replacement. Accessible
/// sections mark every spot accessible, other sections mark the first
/// [`ACCESSIBLE_QUOTA`] positions. EV sections mark every spot EV.
/// Negative inputs are treated as zero; callers clamp `available` to capacity.
pub fn generate_spots(
    section_id: &str,
    effective_capacity: i32,
    available: i32,
    section_type: SectionType,
    rng: &mut dyn RandomSource,
) -> Vec<Spot> {
    let capacity = effective_capacity.max(0) as usize;
    let target = capacity.saturating_sub(available.max(0) as usize);

    let mut occupied = vec![false; capacity];
    let mut occupied_count = 0;
    while occupied_count < target && occupied_count < capacity {
        let idx = rng.index_below(capacity);
        if !occupied[idx] {
            occupied[idx] = true;
            occupied_count += 1;
        }
    }

    let accessible_quota = ACCESSIBLE_QUOTA.min(capacity);

    occupied
        .into_iter()
        .enumerate()
        .map(|(i, is_occupied)| Spot {
            id: Spot::make_id(section_id, i + 1),
            section_id: section_id.to_string(),
            status: if is_occupied {
                SpotStatus::Occupied
            } else {
                SpotStatus::Open
            },
            accessible: section_type == SectionType::Accessible || i < accessible_quota,
            ev: section_type == SectionType::Ev,
        })
        .collect()
}
