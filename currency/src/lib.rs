//! Rupiah text handling for cashsplit.
//!
//! Converts free-form user text such as `"Rp 1.500.000"` or `"IDR 2,000,000"`
//! into whole-unit integers and back into grouped display strings. The
//! splitting engine only ever sees the parsed integer.

pub mod error;
pub mod format;
pub mod parse;
pub mod validate;

pub use error::CurrencyError;
pub use format::{
    format_amount, format_rupiah, format_share, format_with_percentage, group_thousands,
};
pub use parse::parse_amount;
pub use validate::{
    formats_consistently, is_reasonable_amount, validate_input_text, DEFAULT_MAX_AMOUNT,
};

/// Currency marker used when none is configured.
pub const DEFAULT_PREFIX: &str = "Rp";
