//! Seeded random number generation.
//!
//! Every runner takes its randomness from an explicit [`Rng`]; these helpers
//! build one from an optional seed so runs can be reproduced.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from fresh entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Draws `amount` distinct indices from `0..len`, in random order.
///
/// `amount` is clamped to `len`.
pub fn distinct_indices<R: Rng>(len: usize, amount: usize, rng: &mut R) -> Vec<usize> {
    rand::seq::index::sample(rng, len, amount.min(len)).into_vec()
}
