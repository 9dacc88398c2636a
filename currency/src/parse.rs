//! Free-form amount parsing.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::CurrencyError;

static CURRENCY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(rp|idr)\s*").expect("valid regex"));

/// Parse user text into a whole-unit amount.
///
/// Leading/trailing whitespace and a leading `Rp`/`IDR` marker (any case) are
/// dropped, a leading `-` is kept, and every other non-digit character is
/// treated as a separator. `"1.000.000"`, `"Rp 1,500,000"` and `"1500000"`
/// all parse.
pub fn parse_amount(text: &str) -> Result<i64, CurrencyError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CurrencyError::Empty);
    }

    let stripped = CURRENCY_PREFIX.replace(trimmed, "");
    let negative = stripped.starts_with('-');
    let digits: String = stripped.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(CurrencyError::NoDigits);
    }

    let value: i64 = digits.parse().map_err(|_| CurrencyError::Overflow)?;
    Ok(if negative { -value } else { value })
}
