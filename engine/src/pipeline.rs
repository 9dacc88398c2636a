//! The repair pipeline: independent stages composed in a fixed order.

use cashsplit_types::SplitParams;
use tracing::debug;

use crate::random::RandomSource;
use crate::repair::{ensure_distribution, ensure_thousands, ensure_unique};
use crate::settle::settle;

/// One step of post-shuffle repair.
///
/// A stage takes the current list and the target sum and returns a new list
/// that sums to the target again. Stages do not share state.
pub trait RepairStage {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        splits: &[u64],
        target: u64,
        params: &SplitParams,
        rng: &mut dyn RandomSource,
    ) -> Vec<u64>;
}

/// No two parts equal.
pub struct Uniqueness;

/// Every part within the share bounds.
pub struct Distribution;

/// Enough parts ending in 000.
pub struct ThousandsPreference;

/// Deterministic hard guarantees, see [`settle`].
pub struct Settle;

impl RepairStage for Uniqueness {
    fn name(&self) -> &'static str {
        "uniqueness"
    }

    fn apply(
        &self,
        splits: &[u64],
        target: u64,
        params: &SplitParams,
        rng: &mut dyn RandomSource,
    ) -> Vec<u64> {
        ensure_unique(splits, target, params, rng)
    }
}

impl RepairStage for Distribution {
    fn name(&self) -> &'static str {
        "distribution"
    }

    fn apply(
        &self,
        splits: &[u64],
        target: u64,
        params: &SplitParams,
        rng: &mut dyn RandomSource,
    ) -> Vec<u64> {
        ensure_distribution(splits, target, params, rng)
    }
}

impl RepairStage for ThousandsPreference {
    fn name(&self) -> &'static str {
        "thousands"
    }

    fn apply(
        &self,
        splits: &[u64],
        target: u64,
        params: &SplitParams,
        rng: &mut dyn RandomSource,
    ) -> Vec<u64> {
        ensure_thousands(splits, target, params, rng)
    }
}

impl RepairStage for Settle {
    fn name(&self) -> &'static str {
        "settle"
    }

    fn apply(
        &self,
        splits: &[u64],
        target: u64,
        params: &SplitParams,
        _rng: &mut dyn RandomSource,
    ) -> Vec<u64> {
        settle(splits, target, params)
    }
}

/// Ordered list of repair stages.
pub struct RepairPipeline {
    stages: Vec<Box<dyn RepairStage + Send + Sync>>,
}

impl RepairPipeline {
    /// Uniqueness, distribution and thousands preference, then uniqueness and
    /// distribution again as cleanup, then settling.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Box::new(Uniqueness),
                Box::new(Distribution),
                Box::new(ThousandsPreference),
                Box::new(Uniqueness),
                Box::new(Distribution),
                Box::new(Settle),
            ],
        }
    }

    /// A pipeline running exactly `stages`, in order.
    pub fn from_stages(stages: Vec<Box<dyn RepairStage + Send + Sync>>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(
        &self,
        splits: Vec<u64>,
        target: u64,
        params: &SplitParams,
        rng: &mut dyn RandomSource,
    ) -> Vec<u64> {
        self.stages.iter().fold(splits, |current, stage| {
            let next = stage.apply(&current, target, params, rng);
            debug!(stage = stage.name(), ?next, "repair stage done");
            next
        })
    }
}

impl Default for RepairPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
