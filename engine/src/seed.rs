//! Initial candidate generation by greedy sequential allocation.

use cashsplit_types::params::mul_bps;
use cashsplit_types::SplitParams;
use tracing::debug;

use crate::natural::naturalize;
use crate::random::RandomSource;
use crate::rebalance::rebalance;

/// Draw `num_parts` naturalized candidates that sum exactly to `amount`.
///
/// Each of the first `num_parts - 1` slots takes a random share of what is
/// still unallocated. The draw is bounded below by
/// `max(remaining / slots_left / 2, 5% of remaining)` and above by the smaller
/// of 35% of remaining, `2 · remaining / slots_left`, and whatever keeps 5% of
/// the original amount for every slot still to fill. The last slot absorbs
/// the rest. Values come back in generation order.
pub fn seed_splits(
    amount: u64,
    num_parts: usize,
    params: &SplitParams,
    rng: &mut dyn RandomSource,
) -> Vec<u64> {
    let mut splits = Vec::with_capacity(num_parts);
    let mut remaining = amount;
    let reserve_per_slot = mul_bps(amount, params.seed_reserve_bps);

    for i in 0..num_parts.saturating_sub(1) {
        let slots_left = (num_parts - i) as u64;

        let min_part = (remaining / slots_left / 2).max(mul_bps(remaining, params.min_share_bps));
        let reserve = (slots_left - 1) * reserve_per_slot;
        let max_part = mul_bps(remaining, params.seed_max_share_bps)
            .min(remaining * 2 / slots_left)
            .min(remaining.saturating_sub(reserve));

        let part = if min_part >= max_part {
            min_part
        } else {
            rng.int_in_range(min_part, max_part)
        };
        let part = naturalize(part, params, rng);
        splits.push(part);
        remaining = remaining.saturating_sub(part);
    }
    splits.push(naturalize(remaining, params, rng));

    debug!(amount, num_parts, ?splits, "seeded candidates");
    rebalance(&splits, amount, params, rng)
}
