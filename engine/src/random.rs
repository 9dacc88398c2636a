//! The randomness seam.
//!
//! Every random decision in the engine goes through [`RandomSource`], so tests
//! can swap in a scripted source and production can pick its generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random draws needed by the splitting engine.
///
/// Object safe: stages take `&mut dyn RandomSource`.
pub trait RandomSource {
    /// Uniform integer in `low..=high`. Returns `low` when `high <= low`.
    fn int_in_range(&mut self, low: u64, high: u64) -> u64;

    /// Uniform real in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Fair coin flip.
    fn coin(&mut self) -> bool {
        self.unit() < 0.5
    }

    /// Uniform index below `len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        self.int_in_range(0, len.saturating_sub(1) as u64) as usize
    }

    /// Uniform in-place permutation (Fisher–Yates).
    fn shuffle(&mut self, values: &mut [u64]) {
        for i in (1..values.len()).rev() {
            let j = self.int_in_range(0, i as u64) as usize;
            values.swap(i, j);
        }
    }
}

/// Pick one element of `items`, or `None` when empty.
pub fn choose<T: Copy>(rng: &mut dyn RandomSource, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.pick_index(items.len())])
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl RngSource<StdRng> {
    /// Seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn int_in_range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn coin(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }

    fn shuffle(&mut self, values: &mut [u64]) {
        values.shuffle(&mut self.0);
    }
}
