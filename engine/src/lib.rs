//! Splitting engine: turns one amount into a few natural-looking cash parts.
//!
//! The parts always sum to the amount exactly. On top of that the engine
//! aims for amounts a person counting cash would produce:
//! - biased toward values ending in 000, never a whole multiple of a million
//! - every part distinct and within a sane share of the total
//! - shuffled, so generation order never shows in the output
//!
//! Generation is a fixed sequence: seed, rebalance, shuffle, then the repair
//! pipeline (uniqueness, distribution, thousands preference, cleanup, settle).
//! All randomness comes from an injected [`RandomSource`].

pub mod error;
pub mod natural;
pub mod pipeline;
pub mod random;
pub mod rebalance;
pub mod repair;
pub mod seed;
pub mod settle;
pub mod splitter;

pub use error::{AmountRejection, SplitterError};
pub use pipeline::{RepairPipeline, RepairStage};
pub use random::{RandomSource, RngSource};
pub use splitter::Splitter;

#[cfg(test)]
mod test_support;
