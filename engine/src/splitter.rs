//! The splitter: validation, part-count choice and the generation sequence.

use cashsplit_types::{SplitParams, SplitResult, Timestamp};
use rand::rngs::StdRng;
use tracing::debug;

use crate::error::{AmountRejection, SplitterError};
use crate::pipeline::RepairPipeline;
use crate::random::{choose, RandomSource, RngSource};
use crate::seed::seed_splits;

/// Splits one amount into a few natural-looking parts.
///
/// Holds no state across calls besides its random source.
pub struct Splitter<R = RngSource<StdRng>> {
    rng: R,
    params: SplitParams,
    pipeline: RepairPipeline,
}

impl Splitter {
    /// Default parameters, entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_random(RngSource::from_entropy())
    }

    /// Default parameters, reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_random(RngSource::seeded(seed))
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Splitter<R> {
    pub fn with_random(rng: R) -> Self {
        Self {
            rng,
            params: SplitParams::default(),
            pipeline: RepairPipeline::standard(),
        }
    }

    /// Replace the parameters. Rejects sets that fail [`SplitParams::check`].
    pub fn with_params(mut self, params: SplitParams) -> Result<Self, SplitterError> {
        params.check()?;
        self.params = params;
        Ok(self)
    }

    pub fn with_pipeline(mut self, pipeline: RepairPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn params(&self) -> &SplitParams {
        &self.params
    }

    pub fn random(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Split `amount` into `num_parts` parts, or 5 or 6 when `None`.
    ///
    /// Input is validated before any random draw is made.
    pub fn split(
        &mut self,
        amount: i64,
        num_parts: Option<usize>,
    ) -> Result<SplitResult, SplitterError> {
        let amount = self.check_amount(amount)?;
        let num_parts = match num_parts {
            Some(n) => self.check_parts(n)?,
            None => self.auto_parts()?,
        };

        let splits = self.generate_splits(amount, num_parts);
        let result = SplitResult::new(amount, splits, num_parts, Timestamp::now())?;
        debug!(amount, num_parts, splits = ?result.splits(), "amount split");
        Ok(result)
    }

    /// Run seed, shuffle and repair for an already validated request.
    pub fn generate_splits(&mut self, amount: u64, num_parts: usize) -> Vec<u64> {
        let mut splits = seed_splits(amount, num_parts, &self.params, &mut self.rng);
        debug!(?splits, "seeded");
        self.rng.shuffle(&mut splits);
        self.pipeline.run(splits, amount, &self.params, &mut self.rng)
    }

    fn check_amount(&self, amount: i64) -> Result<u64, SplitterError> {
        let reason = if amount <= 0 {
            AmountRejection::NonPositive
        } else if (amount as u64) < self.params.min_amount {
            AmountRejection::BelowMinimum {
                minimum: self.params.min_amount,
            }
        } else {
            return Ok(amount as u64);
        };
        Err(SplitterError::InvalidAmount { amount, reason })
    }

    fn check_parts(&self, requested: usize) -> Result<usize, SplitterError> {
        if self.params.allows_parts(requested) {
            Ok(requested)
        } else {
            Err(SplitterError::InvalidPartCount {
                requested,
                min: self.params.min_parts,
                max: self.params.max_parts,
            })
        }
    }

    fn auto_parts(&mut self) -> Result<usize, SplitterError> {
        choose(&mut self.rng, &self.params.auto_parts).ok_or(SplitterError::InvalidPartCount {
            requested: 0,
            min: self.params.min_parts,
            max: self.params.max_parts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::natural::{is_round_million, is_thousand};

    #[test]
    fn splits_ten_million_into_five() {
        let mut splitter = Splitter::seeded(7);
        let result = splitter.split(10_000_000, Some(5)).unwrap();
        assert_eq!(result.num_parts(), 5);
        assert_eq!(result.splits().len(), 5);
        assert_eq!(result.total(), 10_000_000);
        assert!(result.is_balanced());
        for &s in result.splits() {
            assert!((500_000..=4_000_000).contains(&s), "{s}");
            assert!(!is_round_million(s));
        }
    }

    #[test]
    fn minimum_amount_in_six_parts() {
        let mut splitter = Splitter::seeded(3);
        let result = splitter.split(10_000, Some(6)).unwrap();
        assert_eq!(result.total(), 10_000);
        let mut sorted = result.splits().to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
        assert!(sorted.iter().all(|&s| s > 0));
    }

    #[test]
    fn auto_picks_five_or_six() {
        let mut splitter = Splitter::seeded(11);
        for _ in 0..20 {
            let n = splitter.split(5_000_000, None).unwrap().num_parts();
            assert!(n == 5 || n == 6);
        }
    }

    #[test]
    fn rejects_zero_and_negative() {
        let mut splitter = Splitter::seeded(0);
        for amount in [0, -5] {
            match splitter.split(amount, Some(5)) {
                Err(SplitterError::InvalidAmount {
                    reason: AmountRejection::NonPositive,
                    ..
                }) => {}
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_below_minimum() {
        let mut splitter = Splitter::seeded(0);
        let err = splitter.split(9_999, Some(5)).unwrap_err();
        assert!(matches!(
            err,
            SplitterError::InvalidAmount {
                amount: 9_999,
                reason: AmountRejection::BelowMinimum { minimum: 10_000 }
            }
        ));
        assert_eq!(err.to_string(), "Jumlah minimal untuk dibagi adalah Rp 10.000");
    }

    #[test]
    fn rejects_part_counts_outside_range() {
        let mut splitter = Splitter::seeded(0);
        for n in [0, 1, 7] {
            assert!(matches!(
                splitter.split(1_000_000, Some(n)),
                Err(SplitterError::InvalidPartCount { requested, .. }) if requested == n
            ));
        }
    }

    #[test]
    fn amount_is_checked_before_part_count() {
        let mut splitter = Splitter::seeded(0);
        assert!(matches!(
            splitter.split(0, Some(9)),
            Err(SplitterError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn same_seed_same_splits() {
        let a = Splitter::seeded(42).split(12_345_678, Some(6)).unwrap();
        let b = Splitter::seeded(42).split(12_345_678, Some(6)).unwrap();
        assert_eq!(a.splits(), b.splits());
    }

    #[test]
    fn meets_thousands_requirement_for_large_amounts() {
        let mut splitter = Splitter::seeded(5);
        for _ in 0..20 {
            let result = splitter.split(50_000_000, Some(5)).unwrap();
            let thousands = result.splits().iter().filter(|&&s| is_thousand(s)).count();
            assert!(thousands >= 3, "{:?}", result.splits());
        }
    }

    #[test]
    fn with_params_rejects_bad_sets() {
        let params = SplitParams {
            auto_parts: vec![9],
            ..SplitParams::default()
        };
        assert!(matches!(
            Splitter::seeded(0).with_params(params),
            Err(SplitterError::Params(_))
        ));
    }

    #[test]
    fn custom_auto_parts_are_used() {
        let params = SplitParams {
            auto_parts: vec![3],
            ..SplitParams::default()
        };
        let mut splitter = Splitter::seeded(1).with_params(params).unwrap();
        assert_eq!(splitter.split(3_000_000, None).unwrap().num_parts(), 3);
    }
}
