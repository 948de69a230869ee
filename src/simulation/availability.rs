use super::rng::RandomSource;

/// Maximum perturbation as a share of capacity, applied in either direction.
pub const VARIATION_RATIO: f64 = 0.05;

/// Nudges `original` by a random amount within ±5% of `capacity`, clamped to
/// `[0, capacity]`. A non-positive capacity always yields 0.
pub fn vary_availability(original: i32, capacity: i32, rng: &mut dyn RandomSource) -> i32 {
    if capacity <= 0 {
        return 0;
    }

    let spread = capacity as f64 * VARIATION_RATIO;
    let variation = (rng.next_unit() * spread * 2.0).floor() - spread;
    let varied = original as f64 + variation;

    varied.clamp(0.0, capacity as f64).floor() as i32
}
