use thiserror::Error;

/// Reasons user text could not become an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("Masukkan angka yang valid (contoh: 1000000 atau 1.000.000)")]
    Empty,

    #[error("Masukkan angka yang valid (contoh: 1000000 atau 1.000.000)")]
    NoDigits,

    #[error("Angka terlalu besar untuk diproses")]
    Overflow,

    #[error("Jumlah terlalu besar untuk diproses (maksimal {max})")]
    OutOfRange { amount: i64, max: i64 },
}
