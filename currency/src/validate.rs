//! Checks applied to user input before and after parsing.

use crate::error::CurrencyError;
use crate::format::format_rupiah;

/// Soft sanity bound on amounts accepted from users.
pub const DEFAULT_MAX_AMOUNT: i64 = 1_000_000_000;

/// Reject text that cannot possibly hold an amount.
pub fn validate_input_text(text: &str) -> Result<(), CurrencyError> {
    if text.trim().is_empty() {
        return Err(CurrencyError::Empty);
    }
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return Err(CurrencyError::NoDigits);
    }
    Ok(())
}

/// `0 <= amount <= max`.
pub fn is_reasonable_amount(amount: i64, max: i64) -> bool {
    (0..=max).contains(&amount)
}

/// Whether every amount renders with the marker and, from 1.000 up, a separator.
pub fn formats_consistently(amounts: &[i64]) -> bool {
    amounts.iter().all(|&amount| {
        let text = format_rupiah(amount);
        text.starts_with("Rp ") && (amount.unsigned_abs() < 1_000 || text.contains('.'))
    })
}
