//! Hand-traceable random source for unit tests.

use crate::random::RandomSource;

/// `int_in_range` always returns `low`, `unit` replays a fixed list, and the
/// coin always shows the same side.
pub struct Scripted {
    units: Vec<f64>,
    next: usize,
    heads: bool,
}

impl Scripted {
    pub fn with_units(units: Vec<f64>) -> Self {
        Self {
            units,
            next: 0,
            heads: true,
        }
    }

    /// Every draw at its lowest: `low`, `0.0`, heads.
    pub fn lowest() -> Self {
        Self::with_units(vec![0.0])
    }

    pub fn tails(mut self) -> Self {
        self.heads = false;
        self
    }
}

impl RandomSource for Scripted {
    fn int_in_range(&mut self, low: u64, _high: u64) -> u64 {
        low
    }

    fn unit(&mut self) -> f64 {
        let u = self.units[self.next % self.units.len()];
        self.next += 1;
        u
    }

    fn coin(&mut self) -> bool {
        self.heads
    }
}
