//! Splitter errors.

use std::fmt;

use thiserror::Error;

/// Why an amount was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRejection {
    /// Zero or negative.
    NonPositive,
    /// Positive but under the smallest splittable amount.
    BelowMinimum { minimum: u64 },
}

impl fmt::Display for AmountRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive => write!(f, "Jumlah harus lebih besar dari 0"),
            Self::BelowMinimum { minimum } => write!(
                f,
                "Jumlah minimal untuk dibagi adalah Rp {}",
                grouped(*minimum)
            ),
        }
    }
}

/// `10000` → `"10.000"`.
fn grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Error)]
pub enum SplitterError {
    #[error("{reason}")]
    InvalidAmount { amount: i64, reason: AmountRejection },

    #[error("Jumlah bagian harus antara {min} dan {max} (diminta {requested})")]
    InvalidPartCount {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("parameter error: {0}")]
    Params(#[from] cashsplit_types::params::ParamsError),

    #[error("result error: {0}")]
    Result(#[from] cashsplit_types::ResultError),
}
