mod availability;
mod rng;
mod spots;

pub use availability::{vary_availability, VARIATION_RATIO};
pub use rng::{RandomSource, StdRandom};
pub use spots::{generate_spots, ACCESSIBLE_QUOTA};

#[cfg(test)]
pub use rng::SequenceRandom;
