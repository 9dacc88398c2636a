//! Printing split results and statistics.

use std::fmt::Write;

use cashsplit_currency::{format_amount, format_share};
use cashsplit_types::{SplitPart, SplitResult};
use cashsplit_utils::StatsSummary;
use serde::Serialize;

/// JSON shape of one split: the result plus its per-part view.
#[derive(Serialize)]
struct JsonSplit<'a> {
    #[serde(flatten)]
    result: &'a SplitResult,
    parts: Vec<SplitPart>,
    balanced: bool,
}

fn amount(value: u64, prefix: &str) -> String {
    format_amount(i64::try_from(value).unwrap_or(i64::MAX), prefix)
}

/// One line per part with index, amount and one-decimal share, then the
/// total and whether it matches the original amount.
pub fn render_table(result: &SplitResult, prefix: &str) -> String {
    let total = i64::try_from(result.original_amount()).unwrap_or(i64::MAX);
    let rows: Vec<(String, String)> = result
        .splits()
        .iter()
        .map(|&s| {
            let share = format_share(i64::try_from(s).unwrap_or(i64::MAX), total);
            (amount(s, prefix), share)
        })
        .collect();
    let width = rows.iter().map(|(a, _)| a.len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} dibagi menjadi {} bagian",
        amount(result.original_amount(), prefix),
        result.num_parts()
    );
    for (i, (text, share)) in rows.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {text:>width$}  {share:>6}", i + 1);
    }
    let marker = if result.is_balanced() { "✓" } else { "✗" };
    let _ = writeln!(out, "Total: {} {marker}", amount(result.total(), prefix));
    out
}

pub fn render_json(result: &SplitResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonSplit {
        result,
        parts: result.parts(),
        balanced: result.is_balanced(),
    })
}

pub fn render_stats_table(summary: &StatsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Runs:            {}", summary.runs);
    let _ = writeln!(out, "Parts emitted:   {}", summary.parts);
    for (parts, count) in &summary.part_counts {
        let _ = writeln!(out, "  {parts} bagian:      {count}");
    }
    let _ = writeln!(
        out,
        "Ending in 000:   {:.1}%",
        summary.thousands_ratio * 100.0
    );
    let _ = writeln!(out, "Distinct splits: {}", summary.distinct_splits);
    if let (Some(min), Some(max)) = (summary.min_share, summary.max_share) {
        let _ = writeln!(out, "Share range:     {min:.2}% .. {max:.2}%");
    }
    out
}

pub fn render_stats_json(summary: &StatsSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
