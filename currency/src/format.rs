//! Display formatting with `.` as the thousands separator.

use crate::DEFAULT_PREFIX;

/// `1234567` → `"1.234.567"`.
pub fn group_thousands(value: u64) -> String {
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

/// Grouped amount behind a currency marker: `"Rp 1.000.000"`, `"Rp -1.000"`.
pub fn format_amount(amount: i64, prefix: &str) -> String {
    let grouped = group_thousands(amount.unsigned_abs());
    if amount < 0 {
        format!("{prefix} -{grouped}")
    } else {
        format!("{prefix} {grouped}")
    }
}

/// [`format_amount`] with the rupiah marker.
pub fn format_rupiah(amount: i64) -> String {
    format_amount(amount, DEFAULT_PREFIX)
}

/// One-decimal share of `total`: `"25.0%"`.
///
/// Truncated in integers, `(amount * 1000 / total) / 10`. A zero total shows
/// `0.0%`.
pub fn format_share(amount: i64, total: i64) -> String {
    let tenths = if total == 0 {
        0
    } else {
        amount as i128 * 1_000 / total as i128
    };
    format!("{:.1}%", tenths as f64 / 10.0)
}

/// `"Rp 2.500.000 (25.0%)"`, see [`format_share`].
pub fn format_with_percentage(amount: i64, total: i64) -> String {
    format!("{} ({})", format_rupiah(amount), format_share(amount, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_three_from_the_right() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1.000");
        assert_eq!(group_thousands(12_345), "12.345");
        assert_eq!(group_thousands(1_000_000), "1.000.000");
        assert_eq!(group_thousands(123_456_789), "123.456.789");
    }

    #[test]
    fn rupiah_prefix_and_sign() {
        assert_eq!(format_rupiah(1_000_000), "Rp 1.000.000");
        assert_eq!(format_rupiah(1_500_000), "Rp 1.500.000");
        assert_eq!(format_rupiah(-1_000), "Rp -1.000");
        assert_eq!(format_rupiah(500), "Rp 500");
    }

    #[test]
    fn custom_prefix() {
        assert_eq!(format_amount(2_500, "IDR"), "IDR 2.500");
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(format_rupiah(i64::MIN), "Rp -9.223.372.036.854.775.808");
    }

    #[test]
    fn percentage_has_one_truncated_decimal() {
        assert_eq!(format_with_percentage(2_500_000, 10_000_000), "Rp 2.500.000 (25.0%)");
        assert_eq!(format_with_percentage(1, 3), "Rp 1 (33.3%)");
        assert_eq!(format_with_percentage(2, 3), "Rp 2 (66.6%)");
        assert_eq!(format_with_percentage(5, 0), "Rp 5 (0.0%)");
    }

    #[test]
    fn share_alone() {
        assert_eq!(format_share(4_000_000, 10_000_000), "40.0%");
        assert_eq!(format_share(499_999, 10_000_000), "4.9%");
    }
}
