//! Exact-sum rebalancing.
//!
//! Every stage that perturbs values ends by calling [`rebalance`], which moves
//! small random increments into or out of slots until the list sums to the
//! target again.

use cashsplit_types::SplitParams;
use tracing::{trace, warn};

use crate::natural::is_thousand;
use crate::random::RandomSource;

/// Largest fraction of a slot a single decrement may remove (1/10).
const MAX_DECREMENT_DIVISOR: u64 = 10;

/// Return a copy of `splits` that sums to exactly `target`.
///
/// Each move is sized between `diff / (2·len)` and `diff / len + 1`, so the
/// remaining difference shrinks geometrically whatever the draws are. Slots
/// not already ending in 000 receive the move with probability
/// `prefer_uneven_probability`, keeping round slots round. A decrement never
/// takes more than a tenth of a slot; when the chosen slot is too small the
/// largest slot gives instead. Values stay positive.
pub fn rebalance(
    splits: &[u64],
    target: u64,
    params: &SplitParams,
    rng: &mut dyn RandomSource,
) -> Vec<u64> {
    let mut out = splits.to_vec();
    if out.is_empty() {
        return out;
    }

    let current: u64 = out.iter().sum();
    if current == target {
        return out;
    }

    let len = out.len() as u64;
    let uneven: Vec<usize> = out
        .iter()
        .enumerate()
        .filter(|(_, &v)| !is_thousand(v))
        .map(|(i, _)| i)
        .collect();

    if current < target {
        let mut diff = target - current;
        while diff > 0 {
            let idx = pick_slot(&uneven, out.len(), params, rng);
            let step = draw_step(diff, len, rng);
            out[idx] += step;
            diff -= step;
            trace!(idx, step, diff, "rebalance add");
        }
    } else {
        let mut diff = current - target;
        while diff > 0 {
            let idx = pick_slot(&uneven, out.len(), params, rng);
            let cap = diff.min(out[idx] / MAX_DECREMENT_DIVISOR);
            if cap > 0 {
                let step = draw_step(diff, len, rng).min(cap);
                out[idx] -= step;
                diff -= step;
                trace!(idx, step, diff, "rebalance take");
                continue;
            }

            let Some((largest, value)) = largest_slot(&out) else {
                break;
            };
            let cap = diff.min(value.saturating_sub(1));
            if cap == 0 {
                warn!(diff, "rebalance cannot shrink any slot further");
                break;
            }
            let step = draw_step(diff, len, rng).min(cap);
            out[largest] -= step;
            diff -= step;
            trace!(idx = largest, step, diff, "rebalance take from largest");
        }
    }

    out
}

fn pick_slot(
    uneven: &[usize],
    len: usize,
    params: &SplitParams,
    rng: &mut dyn RandomSource,
) -> usize {
    if !uneven.is_empty() && rng.unit() < params.prefer_uneven_probability {
        uneven[rng.pick_index(uneven.len())]
    } else {
        rng.pick_index(len)
    }
}

/// A step in `[max(1, diff / 2len), diff / len + 1]`, never above `diff`.
fn draw_step(diff: u64, len: u64, rng: &mut dyn RandomSource) -> u64 {
    let low = (diff / (2 * len)).max(1);
    let high = (diff / len + 1).max(low);
    rng.int_in_range(low, high).min(diff)
}

fn largest_slot(values: &[u64]) -> Option<(usize, u64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .max_by_key(|&(_, v)| v)
}
