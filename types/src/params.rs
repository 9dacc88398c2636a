//! Splitting parameters: share bounds, rounding bias and repair budgets.
//!
//! Every field has a serde default so a partial `[params]` table in a config
//! file only overrides what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Basis-point denominator (10_000 bps = 100%).
pub const BPS: u64 = 10_000;

/// Raised by [`SplitParams::check`] for parameter sets the engine cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("part count range {min}..={max} is empty or starts below 1")]
    PartRange { min: usize, max: usize },

    #[error("auto part count {0} lies outside the allowed part count range")]
    AutoPartOutOfRange(usize),

    #[error("auto part counts must not be empty")]
    NoAutoParts,

    #[error("share bounds {min_bps}..={max_bps} bps are not ordered within 0..=10000")]
    ShareBounds { min_bps: u64, max_bps: u64 },

    #[error("probability {0} must lie in 0.0..=1.0")]
    Probability(f64),
}

/// Tunable constants for the splitting engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitParams {
    // ── Input validation ─────────────────────────────────────────────────
    /// Smallest splittable amount.
    #[serde(default = "default_min_amount")]
    pub min_amount: u64,

    /// Smallest part count a caller may request.
    #[serde(default = "default_min_parts")]
    pub min_parts: usize,

    /// Largest part count a caller may request.
    #[serde(default = "default_max_parts")]
    pub max_parts: usize,

    /// Candidates for the part count when the caller does not pick one.
    #[serde(default = "default_auto_parts")]
    pub auto_parts: Vec<usize>,

    // ── Distribution ─────────────────────────────────────────────────────
    /// Lower share bound for every finished part, in bps of the total.
    #[serde(default = "default_min_share_bps")]
    pub min_share_bps: u64,

    /// Upper share bound for every finished part, in bps of the total.
    #[serde(default = "default_max_share_bps")]
    pub max_share_bps: u64,

    /// Upper bound on a seed draw, in bps of the amount still unallocated.
    #[serde(default = "default_seed_max_share_bps")]
    pub seed_max_share_bps: u64,

    /// Share of the original amount kept back for each unfilled seed slot, in bps.
    #[serde(default = "default_seed_reserve_bps")]
    pub seed_reserve_bps: u64,

    // ── Rounding bias ────────────────────────────────────────────────────
    /// Chance that naturalizing rounds straight to the nearest thousand.
    #[serde(default = "default_round_thousand_probability")]
    pub round_thousand_probability: f64,

    /// Chance that rebalancing targets a non-thousand part when one exists.
    #[serde(default = "default_prefer_uneven_probability")]
    pub prefer_uneven_probability: f64,

    /// Share of parts that should end in 000, in bps of the part count.
    #[serde(default = "default_thousands_target_bps")]
    pub thousands_target_bps: u64,

    /// Absolute minimum number of thousand-ending parts.
    #[serde(default = "default_thousands_floor")]
    pub thousands_floor: usize,

    // ── Repair budgets ───────────────────────────────────────────────────
    /// Outer passes of the uniqueness repair.
    #[serde(default = "default_uniqueness_passes")]
    pub uniqueness_passes: u32,

    /// Nudges tried per duplicate within one uniqueness pass.
    #[serde(default = "default_uniqueness_attempts")]
    pub uniqueness_attempts: u32,

    /// Passes of the distribution repair.
    #[serde(default = "default_distribution_passes")]
    pub distribution_passes: u32,

    /// Passes of the thousands-preference repair.
    #[serde(default = "default_thousands_passes")]
    pub thousands_passes: u32,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_min_amount() -> u64 {
    10_000
}

fn default_min_parts() -> usize {
    2
}

fn default_max_parts() -> usize {
    6
}

fn default_auto_parts() -> Vec<usize> {
    vec![5, 6]
}

fn default_min_share_bps() -> u64 {
    500
}

fn default_max_share_bps() -> u64 {
    4_000
}

fn default_seed_max_share_bps() -> u64 {
    3_500
}

fn default_seed_reserve_bps() -> u64 {
    500
}

fn default_round_thousand_probability() -> f64 {
    0.8
}

fn default_prefer_uneven_probability() -> f64 {
    0.7
}

fn default_thousands_target_bps() -> u64 {
    5_000
}

fn default_thousands_floor() -> usize {
    3
}

fn default_uniqueness_passes() -> u32 {
    10
}

fn default_uniqueness_attempts() -> u32 {
    20
}

fn default_distribution_passes() -> u32 {
    5
}

fn default_thousands_passes() -> u32 {
    5
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SplitParams {
    /// Lower share bound for `amount` (integer division, like the seed math).
    pub fn min_share(&self, amount: u64) -> u64 {
        mul_bps(amount, self.min_share_bps)
    }

    /// Upper share bound for `amount`.
    pub fn max_share(&self, amount: u64) -> u64 {
        mul_bps(amount, self.max_share_bps)
    }

    /// How many of `num_parts` parts should end in 000.
    ///
    /// `max(floor, ceil(num_parts * target))`, e.g. 3 for five or six parts.
    pub fn required_thousands(&self, num_parts: usize) -> usize {
        let scaled = num_parts as u64 * self.thousands_target_bps;
        let wanted = scaled.div_ceil(BPS) as usize;
        wanted.max(self.thousands_floor)
    }

    /// Whether `num_parts` is an acceptable explicit request.
    pub fn allows_parts(&self, num_parts: usize) -> bool {
        (self.min_parts..=self.max_parts).contains(&num_parts)
    }

    /// Reject parameter sets the engine cannot honour.
    pub fn check(&self) -> Result<(), ParamsError> {
        if self.min_parts == 0 || self.min_parts > self.max_parts {
            return Err(ParamsError::PartRange {
                min: self.min_parts,
                max: self.max_parts,
            });
        }
        if self.auto_parts.is_empty() {
            return Err(ParamsError::NoAutoParts);
        }
        if let Some(&bad) = self.auto_parts.iter().find(|&&n| !self.allows_parts(n)) {
            return Err(ParamsError::AutoPartOutOfRange(bad));
        }
        if self.min_share_bps > self.max_share_bps || self.max_share_bps > BPS {
            return Err(ParamsError::ShareBounds {
                min_bps: self.min_share_bps,
                max_bps: self.max_share_bps,
            });
        }
        for p in [self.round_thousand_probability, self.prefer_uneven_probability] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ParamsError::Probability(p));
            }
        }
        Ok(())
    }
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            min_amount: default_min_amount(),
            min_parts: default_min_parts(),
            max_parts: default_max_parts(),
            auto_parts: default_auto_parts(),
            min_share_bps: default_min_share_bps(),
            max_share_bps: default_max_share_bps(),
            seed_max_share_bps: default_seed_max_share_bps(),
            seed_reserve_bps: default_seed_reserve_bps(),
            round_thousand_probability: default_round_thousand_probability(),
            prefer_uneven_probability: default_prefer_uneven_probability(),
            thousands_target_bps: default_thousands_target_bps(),
            thousands_floor: default_thousands_floor(),
            uniqueness_passes: default_uniqueness_passes(),
            uniqueness_attempts: default_uniqueness_attempts(),
            distribution_passes: default_distribution_passes(),
            thousands_passes: default_thousands_passes(),
        }
    }
}

/// `amount * bps / 10_000` without intermediate overflow.
pub fn mul_bps(amount: u64, bps: u64) -> u64 {
    (amount as u128 * bps as u128 / BPS as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let params = SplitParams::default();
        assert_eq!(params.min_amount, 10_000);
        assert_eq!(params.auto_parts, vec![5, 6]);
        assert_eq!(params.min_share(10_000_000), 500_000);
        assert_eq!(params.max_share(10_000_000), 4_000_000);
        assert!(params.check().is_ok());
    }

    #[test]
    fn required_thousands_rounds_half_up_with_floor() {
        let params = SplitParams::default();
        assert_eq!(params.required_thousands(2), 3);
        assert_eq!(params.required_thousands(5), 3);
        assert_eq!(params.required_thousands(6), 3);
        assert_eq!(params.required_thousands(7), 4);
    }

    #[test]
    fn allows_parts_is_inclusive() {
        let params = SplitParams::default();
        assert!(!params.allows_parts(1));
        assert!(params.allows_parts(2));
        assert!(params.allows_parts(6));
        assert!(!params.allows_parts(7));
    }

    #[test]
    fn check_rejects_auto_parts_outside_range() {
        let params = SplitParams {
            auto_parts: vec![5, 9],
            ..SplitParams::default()
        };
        assert_eq!(params.check(), Err(ParamsError::AutoPartOutOfRange(9)));
    }

    #[test]
    fn check_rejects_inverted_share_bounds() {
        let params = SplitParams {
            min_share_bps: 5_000,
            max_share_bps: 4_000,
            ..SplitParams::default()
        };
        assert!(matches!(params.check(), Err(ParamsError::ShareBounds { .. })));
    }

    #[test]
    fn check_rejects_out_of_range_probability() {
        let params = SplitParams {
            round_thousand_probability: 1.5,
            ..SplitParams::default()
        };
        assert_eq!(params.check(), Err(ParamsError::Probability(1.5)));
        assert_eq!(
            params.check().unwrap_err().to_string(),
            "probability 1.5 must lie in 0.0..=1.0"
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: SplitParams =
            serde_json::from_str(r#"{"min_amount": 50000}"#).expect("should parse");
        assert_eq!(params.min_amount, 50_000);
        assert_eq!(params.max_share_bps, 4_000);
        assert_eq!(params.uniqueness_attempts, 20);
    }
}
