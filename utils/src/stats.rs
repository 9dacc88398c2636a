//! Aggregate statistics over many split results.
//!
//! Used to eyeball how natural repeated splits look: how often each part
//! count comes up, what share of parts end in 000, and how far the largest
//! and smallest shares stray.

use std::collections::{BTreeMap, HashSet};

use cashsplit_types::{percentage_of, SplitResult};
use serde::Serialize;

/// Running tally of recorded split results.
#[derive(Debug, Default)]
pub struct SplitStats {
    runs: u64,
    parts: u64,
    thousands: u64,
    part_counts: BTreeMap<usize, u64>,
    distinct: HashSet<Vec<u64>>,
    min_share: Option<f64>,
    max_share: Option<f64>,
}

/// Serializable snapshot of [`SplitStats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub runs: u64,
    pub parts: u64,
    pub thousands_ratio: f64,
    pub part_counts: BTreeMap<usize, u64>,
    pub distinct_splits: usize,
    pub min_share: Option<f64>,
    pub max_share: Option<f64>,
}

impl SplitStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &SplitResult) {
        self.runs += 1;
        self.parts += result.num_parts() as u64;
        self.thousands += result.thousands_count() as u64;
        *self.part_counts.entry(result.num_parts()).or_insert(0) += 1;

        let mut sorted = result.splits().to_vec();
        sorted.sort_unstable();
        self.distinct.insert(sorted);

        for &split in result.splits() {
            let share = percentage_of(split, result.original_amount());
            self.min_share = Some(self.min_share.map_or(share, |m| m.min(share)));
            self.max_share = Some(self.max_share.map_or(share, |m| m.max(share)));
        }
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// How many recorded results had each part count.
    pub fn part_counts(&self) -> &BTreeMap<usize, u64> {
        &self.part_counts
    }

    /// Fraction of all recorded parts ending in 000, `0.0` before any record.
    pub fn thousands_ratio(&self) -> f64 {
        if self.parts == 0 {
            0.0
        } else {
            self.thousands as f64 / self.parts as f64
        }
    }

    /// Number of different results, ignoring part order.
    pub fn distinct_splits(&self) -> usize {
        self.distinct.len()
    }

    /// Smallest share seen, in percent.
    pub fn min_share(&self) -> Option<f64> {
        self.min_share
    }

    /// Largest share seen, in percent.
    pub fn max_share(&self) -> Option<f64> {
        self.max_share
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            runs: self.runs,
            parts: self.parts,
            thousands_ratio: self.thousands_ratio(),
            part_counts: self.part_counts.clone(),
            distinct_splits: self.distinct_splits(),
            min_share: self.min_share,
            max_share: self.max_share,
        }
    }
}
