//! Soft repair stages: uniqueness, distribution and thousands preference.
//!
//! Each stage takes a list and the target sum and returns a new list that
//! again sums to the target. All loops are capped by [`SplitParams`] budgets
//! since the three constraints can conflict; a stage that runs out of budget
//! logs a warning and returns its best effort.

use std::collections::HashSet;

use cashsplit_types::SplitParams;
use tracing::{debug, warn};

use crate::natural::{is_thousand, round_half_up, MIN_NATURAL, THOUSAND};
use crate::random::{choose, RandomSource};
use crate::rebalance::rebalance;

/// Nudges for duplicates that end in 000.
const THOUSAND_NUDGES: [u64; 3] = [1_000, 2_000, 3_000];
/// Nudge range for duplicates that do not end in 000.
const UNEVEN_NUDGE: (u64, u64) = (100, 1_000);

/// Indices of values already seen earlier in the list.
pub fn duplicate_indices(values: &[u64]) -> Vec<usize> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !seen.insert(**v))
        .map(|(i, _)| i)
        .collect()
}

fn collides(values: &[u64], idx: usize) -> bool {
    values
        .iter()
        .enumerate()
        .any(|(j, &v)| j != idx && v == values[idx])
}

/// Nudge later duplicates until every value is distinct.
///
/// A duplicate ending in 000 moves by 1,000, 2,000 or 3,000 to stay round;
/// any other moves by 100–1,000. Up to `uniqueness_attempts` nudges per
/// duplicate and `uniqueness_passes` passes, rebalancing after each pass.
pub fn ensure_unique(
    splits: &[u64],
    target: u64,
    params: &SplitParams,
    rng: &mut dyn RandomSource,
) -> Vec<u64> {
    let mut out = splits.to_vec();

    for pass in 0..params.uniqueness_passes {
        let duplicates = duplicate_indices(&out);
        if duplicates.is_empty() {
            return out;
        }
        debug!(pass, ?duplicates, "repairing duplicates");

        for idx in duplicates {
            let base = out[idx];
            let keep_round = is_thousand(base);
            let mut attempts = 0;
            while collides(&out, idx) && attempts < params.uniqueness_attempts {
                let delta = if keep_round {
                    choose(rng, &THOUSAND_NUDGES).unwrap_or(THOUSAND)
                } else {
                    rng.int_in_range(UNEVEN_NUDGE.0, UNEVEN_NUDGE.1)
                };
                out[idx] = if rng.coin() {
                    base + delta
                } else {
                    base.saturating_sub(delta).max(MIN_NATURAL)
                };
                attempts += 1;
            }
        }

        out = rebalance(&out, target, params, rng);
    }

    if !duplicate_indices(&out).is_empty() {
        warn!(?out, "uniqueness budget exhausted");
    }
    out
}

/// Pull every value into `[min_share, max_share]` of the target.
///
/// Values are placed a random step inside the violated bound (up to a tenth
/// of it) rather than on it, so clamped values do not collide. Up to
/// `distribution_passes` clamp-and-rebalance passes.
pub fn ensure_distribution(
    splits: &[u64],
    target: u64,
    params: &SplitParams,
    rng: &mut dyn RandomSource,
) -> Vec<u64> {
    let min_allowed = params.min_share(target);
    let max_allowed = params.max_share(target);
    let within = |v: &u64| (min_allowed..=max_allowed).contains(v);

    let mut out = splits.to_vec();
    if out.iter().all(within) {
        return out;
    }

    for pass in 0..params.distribution_passes {
        for value in out.iter_mut() {
            if *value < min_allowed {
                *value = min_allowed + rng.int_in_range(0, min_allowed / 10);
            } else if *value > max_allowed {
                *value = max_allowed - rng.int_in_range(0, max_allowed / 10);
            }
        }
        out = rebalance(&out, target, params, rng);
        if out.iter().all(within) {
            debug!(pass, "distribution within bounds");
            return out;
        }
    }

    warn!(
        ?out,
        min_allowed, max_allowed, "distribution budget exhausted"
    );
    out
}

/// Make sure enough values end in 000.
///
/// When fewer than [`SplitParams::required_thousands`] do, the largest values
/// that do not are rounded to the nearest thousand and the list is
/// rebalanced. Up to `thousands_passes` passes.
pub fn ensure_thousands(
    splits: &[u64],
    target: u64,
    params: &SplitParams,
    rng: &mut dyn RandomSource,
) -> Vec<u64> {
    let required = params.required_thousands(splits.len());
    let mut out = splits.to_vec();

    for pass in 0..params.thousands_passes {
        let have = out.iter().filter(|&&v| is_thousand(v)).count();
        if have >= required {
            return out;
        }

        let mut uneven: Vec<usize> = (0..out.len()).filter(|&i| !is_thousand(out[i])).collect();
        if uneven.is_empty() {
            return out;
        }
        uneven.sort_by(|&a, &b| out[b].cmp(&out[a]));

        let needed = required - have;
        debug!(pass, have, required, "rounding largest values to thousands");
        for &idx in uneven.iter().take(needed) {
            out[idx] = round_half_up(out[idx], THOUSAND).max(MIN_NATURAL);
        }
        out = rebalance(&out, target, params, rng);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;
    use crate::test_support::Scripted;

    fn params() -> SplitParams {
        SplitParams::default()
    }

    #[test]
    fn duplicate_indices_report_later_occurrences() {
        assert_eq!(duplicate_indices(&[1, 2, 1, 3, 2, 1]), vec![2, 4, 5]);
        assert!(duplicate_indices(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn unique_removes_duplicates_and_keeps_sum() {
        for seed in 0..100 {
            let mut rng = RngSource::seeded(seed);
            let input = [2_000_000, 2_000_000, 2_000_000, 2_000_000, 2_000_000];
            let out = ensure_unique(&input, 10_000_000, &params(), &mut rng);
            assert_eq!(out.iter().sum::<u64>(), 10_000_000);
            assert!(duplicate_indices(&out).is_empty(), "seed {seed}: {out:?}");
        }
    }

    #[test]
    fn unique_leaves_distinct_input_alone() {
        let mut rng = RngSource::seeded(1);
        let input = vec![1_000, 2_000, 3_000, 4_000];
        assert_eq!(ensure_unique(&input, 10_000, &params(), &mut rng), input);
    }

    #[test]
    fn distribution_clamps_into_bounds() {
        // Lowest draws: the clamp lands on the bound and the shortfall goes to
        // the first uneven slot.
        let mut rng = Scripted::lowest();
        let input = [4_100_000, 1_500_123, 1_400_456, 1_600_789, 1_398_632];
        let out = ensure_distribution(&input, 10_000_000, &params(), &mut rng);
        assert_eq!(out, vec![4_000_000, 1_600_123, 1_400_456, 1_600_789, 1_398_632]);
    }

    #[test]
    fn distribution_keeps_sum_for_any_draws() {
        for seed in 0..100 {
            let mut rng = RngSource::seeded(seed);
            let input = [100_000, 200_000, 300_000, 400_000, 9_000_000];
            let out = ensure_distribution(&input, 10_000_000, &params(), &mut rng);
            assert_eq!(out.iter().sum::<u64>(), 10_000_000, "seed {seed}");
        }
    }

    #[test]
    fn distribution_gives_up_gracefully_when_infeasible() {
        // Two parts cannot both stay under 40%.
        let mut rng = RngSource::seeded(9);
        let out = ensure_distribution(&[5_000_000, 5_000_000], 10_000_000, &params(), &mut rng);
        assert_eq!(out.iter().sum::<u64>(), 10_000_000);
    }

    #[test]
    fn thousands_rounds_largest_uneven_values() {
        let mut rng = RngSource::seeded(5);
        let input = [3_100_400, 2_600_700, 1_500_300, 1_800_600, 1_000_000];
        // Target equals the rounded sum, so rebalancing has nothing to move.
        let target = 10_001_900;
        let out = ensure_thousands(&input, target, &params(), &mut rng);
        assert_eq!(out, vec![3_100_000, 2_601_000, 1_500_300, 1_800_600, 1_000_000]);
    }

    #[test]
    fn thousands_noop_when_already_satisfied() {
        let mut rng = RngSource::seeded(6);
        let input = vec![1_000, 2_000, 3_000, 4_500];
        assert_eq!(ensure_thousands(&input, 10_500, &params(), &mut rng), input);
    }
}
