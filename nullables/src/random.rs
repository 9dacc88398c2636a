//! Nullable random: deterministic draws for testing.

use cashsplit_engine::RandomSource;

/// A deterministic [`RandomSource`] for testing.
///
/// Replays pre-configured raw draws in order, wrapping around at the end.
/// `int_in_range` maps a draw to `low + draw % span`, `unit` to
/// `(draw % 1_000_000) / 1_000_000`.
pub struct NullRandom {
    draws: Vec<u64>,
    index: usize,
}

impl NullRandom {
    /// Create with a sequence of raw draws. An empty sequence behaves like `[0]`.
    pub fn new(draws: Vec<u64>) -> Self {
        let draws = if draws.is_empty() { vec![0] } else { draws };
        Self { draws, index: 0 }
    }

    /// Create with a single draw that is returned for every call.
    pub fn constant(draw: u64) -> Self {
        Self::new(vec![draw])
    }

    /// How many draws have been taken so far.
    pub fn calls(&self) -> usize {
        self.index
    }

    fn next_draw(&mut self) -> u64 {
        let draw = self.draws[self.index % self.draws.len()];
        self.index += 1;
        draw
    }
}

impl RandomSource for NullRandom {
    fn int_in_range(&mut self, low: u64, high: u64) -> u64 {
        let draw = self.next_draw();
        if high <= low {
            return low;
        }
        match (high - low).checked_add(1) {
            Some(span) => low + draw % span,
            None => low.wrapping_add(draw),
        }
    }

    fn unit(&mut self) -> f64 {
        (self.next_draw() % 1_000_000) as f64 / 1_000_000.0
    }
}
