//! Bounded draws over the deterministic generation stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Uniform draw from the inclusive range `min_value..=max_value`.
pub(crate) fn roll(rng: &mut ChaCha8Rng, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value + 1) as u64;
    min_value + (rng.next_u64() % range_size) as usize
}

pub(crate) fn roll_i32(rng: &mut ChaCha8Rng, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value + 1) as u64;
    min_value + (rng.next_u64() % range_size) as i32
}

pub(crate) fn coin(rng: &mut ChaCha8Rng) -> bool {
    rng.next_u64() & 1 == 0
}

/// Draw in 0..=99, for percentage gates.
pub(crate) fn percent(rng: &mut ChaCha8Rng) -> usize {
    roll(rng, 0, 99)
}
