//! Making a single amount look hand-counted.

use cashsplit_types::SplitParams;

use crate::random::RandomSource;

pub const THOUSAND: u64 = 1_000;
pub const HUNDRED: u64 = 100;
pub const MILLION: u64 = 1_000_000;

/// Floor applied to every naturalized value.
pub const MIN_NATURAL: u64 = 1_000;

/// Offset range applied to exact millions.
const MILLION_NUDGE: (u64, u64) = (50_000, 200_000);

pub fn is_thousand(value: u64) -> bool {
    value % THOUSAND == 0
}

/// A non-zero exact multiple of one million.
pub fn is_round_million(value: u64) -> bool {
    value >= MILLION && value % MILLION == 0
}

/// Round to the nearest multiple of `unit`, halves going up.
pub fn round_half_up(value: u64, unit: u64) -> u64 {
    let rem = value % unit;
    if rem * 2 >= unit {
        value - rem + unit
    } else {
        value - rem
    }
}

/// Perturb and round `value` so it reads like a manually counted amount.
///
/// Exact millions are pushed 50k–200k away first. Then, with probability
/// `round_thousand_probability`, the value goes to the nearest thousand;
/// otherwise a softer rule keeps a remainder under 100, lifts one over 900
/// to the next thousand, and rounds anything else to the nearest hundred.
/// The result is never below [`MIN_NATURAL`].
pub fn naturalize(value: u64, params: &SplitParams, rng: &mut dyn RandomSource) -> u64 {
    let mut value = value;

    if is_round_million(value) {
        let offset = rng.int_in_range(MILLION_NUDGE.0, MILLION_NUDGE.1);
        value = if rng.coin() {
            value + offset
        } else {
            (value - offset).max(value / 2)
        };
    }

    let rem = value % THOUSAND;
    if rng.unit() < params.round_thousand_probability {
        value = round_half_up(value, THOUSAND);
    } else if rem < 100 {
        // close enough to a thousand already
    } else if rem > 900 {
        value = value - rem + THOUSAND;
    } else {
        value = round_half_up(value, HUNDRED);
    }

    value.max(MIN_NATURAL)
}
