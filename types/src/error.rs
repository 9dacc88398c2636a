//! Constructor errors for result types.

use thiserror::Error;

/// Raised when a [`SplitResult`](crate::SplitResult) or
/// [`SplitPart`](crate::SplitPart) would violate its invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResultError {
    #[error("original amount must be positive")]
    NonPositiveTotal,

    #[error("splits list cannot be empty")]
    EmptySplits,

    #[error("number of splits ({actual}) must match num_parts ({expected})")]
    PartCountMismatch { expected: usize, actual: usize },

    #[error("split at index {0} is not positive")]
    NonPositiveSplit(usize),

    #[error("percentage must be a finite, non-negative number, got {0}")]
    InvalidPercentage(f64),
}
