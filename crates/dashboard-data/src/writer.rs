//! Writing creatives back out in the export layout.
//!
//! The output uses every known column and reads back through
//! [`parse_creatives`](crate::parser::parse_creatives) to the same values.

use dashboard_core::models::Creative;

use crate::parser::{columns, DATE_FORMAT};

/// Render `creatives` as export text with a header row.
///
/// Fields containing a comma are wrapped in double quotes. The reader has no
/// escape for a literal quote, so quotes inside text fields are dropped, and
/// it splits records on any line break, so `\r` and `\n` become spaces.
pub fn write_creatives(creatives: &[Creative]) -> String {
    let mut out = columns::ALL.join(",");
    out.push('\n');

    for c in creatives {
        let date = c
            .launch_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        let fields = [
            field(&c.ad_name),
            field(&c.product),
            field(&c.creator),
            field(&c.content_type),
            field(&c.marketing_angle),
            field(&c.hook),
            field(&c.month),
            field(&c.status),
            date,
            c.budget.to_string(),
            c.conversions.to_string(),
            c.revenue.to_string(),
            c.roas.to_string(),
            c.cost_per_conversion.to_string(),
            c.impressions.to_string(),
            c.clicks.to_string(),
            c.click_rate.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn field(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|&ch| ch != '"')
        .map(|ch| if ch == '\r' || ch == '\n' { ' ' } else { ch })
        .collect();
    if cleaned.contains(',') {
        format!("\"{}\"", cleaned)
    } else {
        cleaned
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
