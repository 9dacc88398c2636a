//! Deterministic settling: the last stage of the pipeline.
//!
//! The soft repair stages are random and capped, so an unlucky run can end
//! with a duplicate, an out-of-range part or a round million. [`settle`]
//! removes those without randomness by moving value between pairs of parts,
//! which keeps the sum fixed. Moves that are whole thousands are tried first.

use cashsplit_types::params::{mul_bps, BPS};
use cashsplit_types::SplitParams;
use tracing::{debug, warn};

use crate::natural::{is_round_million, is_thousand, THOUSAND};

/// Inclusive range every settled part must fall in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub low: u64,
    pub high: u64,
}

impl Bounds {
    /// Share bounds for `num_parts` parts of `target`.
    ///
    /// `ceil(target · min_share)` to `floor(target · max_share)`. A side that
    /// cannot be met by `num_parts` parts summing to `target` (two parts can
    /// never both stay under 40%) is relaxed to `1` or `target`.
    pub fn for_parts(target: u64, num_parts: usize, params: &SplitParams) -> Self {
        let n = num_parts.max(1) as u64;
        let low = ceil_bps(target, params.min_share_bps).max(1);
        let high = mul_bps(target, params.max_share_bps);

        let low = if low.saturating_mul(n) <= target { low } else { 1 };
        let high = if high >= low && high.saturating_mul(n) >= target {
            high
        } else {
            target
        };
        Self { low, high }
    }

    pub fn contains(&self, value: u64) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

fn ceil_bps(amount: u64, bps: u64) -> u64 {
    (amount as u128 * bps as u128).div_ceil(BPS as u128) as u64
}

/// Return `splits` with the sum, bounds, uniqueness and no-round-million
/// guarantees enforced, and at least `required_thousands` parts ending in 000
/// where the target allows it.
pub fn settle(splits: &[u64], target: u64, params: &SplitParams) -> Vec<u64> {
    let mut out = splits.to_vec();
    if out.is_empty() {
        return out;
    }
    let bounds = Bounds::for_parts(target, out.len(), params);

    clamp_into(&mut out, bounds);
    close_gap(&mut out, target, bounds);

    for _ in 0..=out.len() {
        let Some(idx) = first_defect(&out) else {
            break;
        };
        if !fix_defect(&mut out, idx, bounds) {
            warn!(?out, idx, "settle found no move that clears the defect");
            break;
        }
    }

    let required = params
        .required_thousands(out.len())
        .min(max_thousands(out.len(), target));
    top_up_thousands(&mut out, bounds, required);

    debug!(?out, ?bounds, "settled");
    out
}

/// Pull every value inside `bounds`, landing on a thousand where one fits.
fn clamp_into(values: &mut [u64], bounds: Bounds) {
    for value in values.iter_mut() {
        if *value < bounds.low {
            let snapped = bounds.low.div_ceil(THOUSAND) * THOUSAND;
            *value = if snapped <= bounds.high { snapped } else { bounds.low };
        } else if *value > bounds.high {
            let snapped = bounds.high / THOUSAND * THOUSAND;
            *value = if snapped >= bounds.low { snapped } else { bounds.high };
        }
    }
}

/// Restore the exact sum inside `bounds`, filling uneven parts first.
fn close_gap(values: &mut [u64], target: u64, bounds: Bounds) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by_key(|&i| is_thousand(values[i]));

    let sum: u64 = values.iter().sum();
    if sum < target {
        let mut diff = target - sum;
        for i in order {
            let step = (bounds.high - values[i]).min(diff);
            values[i] += step;
            diff -= step;
            if diff == 0 {
                return;
            }
        }
        warn!(diff, "parts cannot grow enough to reach the target");
    } else if sum > target {
        let mut diff = sum - target;
        for i in order {
            let step = (values[i] - bounds.low).min(diff);
            values[i] -= step;
            diff -= step;
            if diff == 0 {
                return;
            }
        }
        warn!(diff, "parts cannot shrink enough to reach the target");
    }
}

/// First part that is a round million or repeats an earlier part.
pub fn first_defect(values: &[u64]) -> Option<usize> {
    (0..values.len()).find(|&i| is_round_million(values[i]) || values[..i].contains(&values[i]))
}

/// Transfer sizes, largest-and-roundest first.
fn transfer_sizes() -> impl Iterator<Item = u64> {
    (1..=9u64)
        .map(|k| k * THOUSAND)
        .chain((1..=9u64).map(|k| k * 100))
        .chain(1..=99u64)
}

/// Whether setting `values[i] = new_i` and `values[j] = new_j` keeps every
/// guarantee for the two touched parts.
fn acceptable(values: &[u64], i: usize, j: usize, new_i: u64, new_j: u64, bounds: Bounds) -> bool {
    bounds.contains(new_i)
        && bounds.contains(new_j)
        && new_i != new_j
        && !is_round_million(new_i)
        && !is_round_million(new_j)
        && values
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != i && k != j)
            .all(|(_, &v)| v != new_i && v != new_j)
}

/// Partners for a transfer, largest first.
fn partners(values: &[u64], i: usize) -> Vec<usize> {
    let mut js: Vec<usize> = (0..values.len()).filter(|&j| j != i).collect();
    js.sort_by(|&a, &b| values[b].cmp(&values[a]));
    js
}

fn fix_defect(values: &mut [u64], i: usize, bounds: Bounds) -> bool {
    let js = partners(values, i);
    for delta in transfer_sizes() {
        for &j in &js {
            // i grows and j shrinks, then the other way round.
            let moves = [
                (values[i].checked_add(delta), values[j].checked_sub(delta)),
                (values[i].checked_sub(delta), values[j].checked_add(delta)),
            ];
            for (new_i, new_j) in moves {
                let (Some(new_i), Some(new_j)) = (new_i, new_j) else {
                    continue;
                };
                if acceptable(values, i, j, new_i, new_j, bounds) {
                    values[i] = new_i;
                    values[j] = new_j;
                    return true;
                }
            }
        }
    }
    false
}

/// Most parts that can end in 000 when they sum to `target`.
fn max_thousands(num_parts: usize, target: u64) -> usize {
    if is_thousand(target) {
        num_parts
    } else {
        num_parts.saturating_sub(1)
    }
}

/// Round uneven parts to a thousand by trading the remainder with another
/// uneven part, until `required` parts end in 000 or no move fits.
fn top_up_thousands(values: &mut [u64], bounds: Bounds, required: usize) {
    for _ in 0..values.len() {
        if values.iter().filter(|&&v| is_thousand(v)).count() >= required {
            return;
        }
        if !round_one(values, bounds) {
            debug!(?values, required, "no thousand-preserving move fits");
            return;
        }
    }
}

fn round_one(values: &mut [u64], bounds: Bounds) -> bool {
    let mut uneven: Vec<usize> = (0..values.len()).filter(|&i| !is_thousand(values[i])).collect();
    uneven.sort_by(|&a, &b| values[b].cmp(&values[a]));

    for &i in &uneven {
        let rem = values[i] % THOUSAND;
        // (rounded value of i, whether i rounds up and so takes from j)
        let down = (values[i] - rem, false);
        let up = (values[i] - rem + THOUSAND, true);
        let options = if rem * 2 >= THOUSAND { [up, down] } else { [down, up] };

        for &j in uneven.iter().filter(|&&j| j != i) {
            for (new_i, takes) in options {
                let new_j = if takes {
                    values[j].checked_sub(new_i - values[i])
                } else {
                    values[j].checked_add(values[i] - new_i)
                };
                let Some(new_j) = new_j else {
                    continue;
                };
                if acceptable(values, i, j, new_i, new_j, bounds) {
                    values[i] = new_i;
                    values[j] = new_j;
                    return true;
                }
            }
        }
    }
    false
}
