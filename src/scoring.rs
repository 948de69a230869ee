//! Best-spot recommendation.
//!
//! Each open spot is scored as
//! `1000 - number + 200·accessible + 150·ev + 50·(2 - occupied_neighbours) + 100·garage`
//! and the highest score wins. Neighbours are the spots immediately before and
//! after in list order; a missing neighbour at either end counts as neither
//! open nor occupied. Ties go to the spot that appears first.

use crate::models::{Lot, Section, Spot, SpotStatus};

pub const PROXIMITY_BASE: i64 = 1000;
pub const ACCESSIBLE_BONUS: i64 = 200;
pub const EV_BONUS: i64 = 150;
pub const ISOLATION_STEP: i64 = 50;
pub const COVERED_BONUS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredSpot<'a> {
    pub spot: &'a Spot,
    pub score: i64,
}

/// Scores the spot at `index` within `spots`.
///
/// The spot number comes from the id suffix, falling back to the list position
/// when the id carries no number.
pub fn score_spot(spots: &[Spot], index: usize, lot: &Lot) -> i64 {
    let spot = &spots[index];
    let number = spot
        .number()
        .map(i64::from)
        .unwrap_or(index as i64 + 1);

    let mut score = PROXIMITY_BASE - number;

    if spot.accessible {
        score += ACCESSIBLE_BONUS;
    }
    if spot.ev {
        score += EV_BONUS;
    }

    let is_occupied = |i: usize| spots.get(i).map(|s| s.status == SpotStatus::Occupied);
    let mut occupied_neighbours = 0;
    if index > 0 && is_occupied(index - 1) == Some(true) {
        occupied_neighbours += 1;
    }
    if is_occupied(index + 1) == Some(true) {
        occupied_neighbours += 1;
    }
    score += (2 - occupied_neighbours) * ISOLATION_STEP;

    if lot.is_garage {
        score += COVERED_BONUS;
    }

    score
}

/// Open spots with their scores, best first. Equal scores keep list order.
pub fn rank_open_spots<'a>(spots: &'a [Spot], lot: &Lot) -> Vec<ScoredSpot<'a>> {
    let mut ranked: Vec<ScoredSpot<'a>> = spots
        .iter()
        .enumerate()
        .filter(|(_, spot)| spot.is_open())
        .map(|(i, spot)| ScoredSpot {
            spot,
            score: score_spot(spots, i, lot),
        })
        .collect();

    // sort_by is stable, so ties stay in list order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// The recommended open spot for `section`, or `None` when nothing is open.
///
/// Takes the section for symmetry with the lot view; the score depends only on
/// the spot list and the lot.
pub fn select_best<'a>(spots: &'a [Spot], lot: &Lot, _section: &Section) -> Option<&'a Spot> {
    rank_open_spots(spots, lot).first().map(|scored| scored.spot)
}
