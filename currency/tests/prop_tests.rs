use proptest::prelude::*;

use cashsplit_currency::{format_rupiah, group_thousands, parse_amount};

proptest! {
    /// Formatted amounts parse back to the same value.
    #[test]
    fn formatted_amount_parses_back(amount in -1_000_000_000_000i64..1_000_000_000_000) {
        prop_assert_eq!(parse_amount(&format_rupiah(amount)), Ok(amount));
    }

    /// Grouping never changes the digits, only inserts separators every three.
    #[test]
    fn grouping_preserves_digits(value in any::<u64>()) {
        let grouped = group_thousands(value);
        let digits: String = grouped.chars().filter(|c| *c != '.').collect();
        prop_assert_eq!(digits, value.to_string());
        for chunk in grouped.split('.').skip(1) {
            prop_assert_eq!(chunk.len(), 3);
        }
    }

    /// Arbitrary separators between digit groups are ignored.
    #[test]
    fn separators_are_ignored(
        groups in prop::collection::vec(0u32..1000, 1..5),
        sep in prop::sample::select(vec![".", ",", " "]),
    ) {
        let text = groups
            .iter()
            .enumerate()
            .map(|(i, g)| if i == 0 { g.to_string() } else { format!("{g:03}") })
            .collect::<Vec<_>>()
            .join(sep);
        let expected: i64 = text.chars().filter(|c| c.is_ascii_digit()).collect::<String>().parse().unwrap();
        prop_assert_eq!(parse_amount(&text), Ok(expected));
    }
}
