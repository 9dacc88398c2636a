//! The output of one split and its per-part view.

use serde::{Deserialize, Serialize};

use crate::error::ResultError;
use crate::time::Timestamp;

/// Share of `part` in `total` with two decimals, computed in integers.
///
/// `(part * 10_000 / total) / 100.0`, so the same inputs always give the same
/// float. A zero total yields `0.0`.
pub fn percentage_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let basis_points = part as u128 * 10_000 / total as u128;
    basis_points as f64 / 100.0
}

/// One finished split: the parts in presentation order plus their total.
///
/// Immutable once built. `sum(splits) == original_amount` is the engine's
/// job and is not re-checked here; see [`SplitResult::is_balanced`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    original_amount: u64,
    splits: Vec<u64>,
    num_parts: usize,
    timestamp: Timestamp,
}

impl SplitResult {
    pub fn new(
        original_amount: u64,
        splits: Vec<u64>,
        num_parts: usize,
        timestamp: Timestamp,
    ) -> Result<Self, ResultError> {
        if original_amount == 0 {
            return Err(ResultError::NonPositiveTotal);
        }
        if splits.is_empty() {
            return Err(ResultError::EmptySplits);
        }
        if splits.len() != num_parts {
            return Err(ResultError::PartCountMismatch {
                expected: num_parts,
                actual: splits.len(),
            });
        }
        if let Some(index) = splits.iter().position(|&s| s == 0) {
            return Err(ResultError::NonPositiveSplit(index));
        }
        Ok(Self {
            original_amount,
            splits,
            num_parts,
            timestamp,
        })
    }

    pub fn original_amount(&self) -> u64 {
        self.original_amount
    }

    pub fn splits(&self) -> &[u64] {
        &self.splits
    }

    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Sum of all parts.
    pub fn total(&self) -> u64 {
        self.splits.iter().sum()
    }

    /// Whether the parts add up to the original amount.
    pub fn is_balanced(&self) -> bool {
        self.total() == self.original_amount
    }

    /// Number of parts that end in 000.
    pub fn thousands_count(&self) -> usize {
        self.splits.iter().filter(|&&s| s % 1_000 == 0).count()
    }

    /// Share of every part in the original amount, in presentation order.
    pub fn percentages(&self) -> Vec<f64> {
        self.splits
            .iter()
            .map(|&s| percentage_of(s, self.original_amount))
            .collect()
    }

    /// Read-only per-part views, computed on demand.
    pub fn parts(&self) -> Vec<SplitPart> {
        self.splits
            .iter()
            .enumerate()
            .map(|(index, &amount)| SplitPart {
                amount,
                percentage: percentage_of(amount, self.original_amount),
                index,
            })
            .collect()
    }
}

/// A single part of a [`SplitResult`] with its share of the total.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitPart {
    pub amount: u64,
    pub percentage: f64,
    pub index: usize,
}

impl SplitPart {
    pub fn new(amount: u64, percentage: f64, index: usize) -> Result<Self, ResultError> {
        if amount == 0 {
            return Err(ResultError::NonPositiveSplit(index));
        }
        if !percentage.is_finite() || percentage < 0.0 {
            return Err(ResultError::InvalidPercentage(percentage));
        }
        Ok(Self {
            amount,
            percentage,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(total: u64, splits: Vec<u64>) -> SplitResult {
        let n = splits.len();
        SplitResult::new(total, splits, n, Timestamp::EPOCH).expect("valid result")
    }

    #[test]
    fn rejects_zero_total() {
        let err = SplitResult::new(0, vec![1], 1, Timestamp::EPOCH).unwrap_err();
        assert_eq!(err, ResultError::NonPositiveTotal);
    }

    #[test]
    fn rejects_empty_splits() {
        let err = SplitResult::new(100, vec![], 0, Timestamp::EPOCH).unwrap_err();
        assert_eq!(err, ResultError::EmptySplits);
    }

    #[test]
    fn rejects_part_count_mismatch() {
        let err = SplitResult::new(100, vec![50, 50], 3, Timestamp::EPOCH).unwrap_err();
        assert_eq!(
            err,
            ResultError::PartCountMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_zero_part() {
        let err = SplitResult::new(100, vec![100, 0], 2, Timestamp::EPOCH).unwrap_err();
        assert_eq!(err, ResultError::NonPositiveSplit(1));
    }

    #[test]
    fn unbalanced_result_is_constructible_but_flagged() {
        let r = result(1_000, vec![400, 500]);
        assert_eq!(r.total(), 900);
        assert!(!r.is_balanced());
    }

    #[test]
    fn percentages_use_integer_truncation() {
        let r = result(3_000_000, vec![1_000_000, 1_000_000, 1_000_000]);
        assert_eq!(r.percentages(), vec![33.33, 33.33, 33.33]);
    }

    #[test]
    fn parts_carry_index_and_share() {
        let r = result(10_000_000, vec![2_345_000, 7_655_000]);
        let parts = r.parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].index, 0);
        assert_eq!(parts[0].amount, 2_345_000);
        assert_eq!(parts[0].percentage, 23.45);
        assert_eq!(parts[1].index, 1);
        assert_eq!(parts[1].percentage, 76.55);
    }

    #[test]
    fn thousands_count_ignores_uneven_parts() {
        let r = result(10_000, vec![3_000, 2_500, 4_500]);
        assert_eq!(r.thousands_count(), 1);
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage_of(5, 0), 0.0);
    }

    #[test]
    fn split_part_rejects_negative_percentage() {
        assert_eq!(
            SplitPart::new(10, -1.0, 0),
            Err(ResultError::InvalidPercentage(-1.0))
        );
        assert!(SplitPart::new(10, 12.5, 3).is_ok());
    }

    #[test]
    fn serializes_to_json() {
        let r = result(10_000, vec![4_000, 6_000]);
        let json = serde_json::to_string(&r).expect("serializable");
        assert!(json.contains("\"original_amount\":10000"));
        assert!(json.contains("\"splits\":[4000,6000]"));
    }
}
