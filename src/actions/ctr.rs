//! Creative ranking by click-through ratio.

use serde::Serialize;

use crate::columns::{coerce_count, require_index, SemanticColumn};
use crate::error::ProcessResult;
use crate::types::Table;

/// One ranked entry of the `ctr_top` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeCtr {
    /// Creative name as it appears in the file (trimmed).
    pub creative: String,
    /// Coerced impressions for the row.
    pub impressions: u64,
    /// Coerced clicks for the row.
    pub clicks: u64,
    /// clicks / impressions, rounded to 4 decimal places.
    pub ctr: f64,
}

/// Rank rows by click-through ratio and keep the top 3.
///
/// Rows without strictly positive impressions cannot produce a meaningful
/// ratio and are excluded before ranking. Ordering is descending by
/// (ctr, clicks, impressions); fewer than 3 qualifying rows yields fewer
/// entries.
pub fn top_creatives(table: &Table) -> ProcessResult<Vec<CreativeCtr>> {
    let impressions_idx = require_index(&table.header, SemanticColumn::Impressions)?;
    let clicks_idx = require_index(&table.header, SemanticColumn::Clicks)?;
    let creative_idx = require_index(&table.header, SemanticColumn::Creative)?;

    let mut ranked: Vec<CreativeCtr> = Vec::new();
    for row in 0..table.row_count() {
        let impressions = coerce_count(table.cell(row, impressions_idx));
        if impressions == 0 {
            continue;
        }
        let clicks = coerce_count(table.cell(row, clicks_idx));
        ranked.push(CreativeCtr {
            creative: table.cell(row, creative_idx).trim().to_string(),
            impressions,
            clicks,
            ctr: round4(clicks as f64 / impressions as f64),
        });
    }

    ranked.sort_by(|a, b| {
        b.ctr
            .total_cmp(&a.ctr)
            .then(b.clicks.cmp(&a.clicks))
            .then(b.impressions.cmp(&a.impressions))
    });
    ranked.truncate(3);
    Ok(ranked)
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::{round4, top_creatives};
    use crate::types::Table;

    fn table(rows: &[(&str, &str, &str)]) -> Table {
        Table::new(
            vec![
                "creative".to_string(),
                "impressions".to_string(),
                "clicks".to_string(),
            ],
            rows.iter()
                .map(|(c, i, k)| vec![c.to_string(), i.to_string(), k.to_string()])
                .collect(),
        )
    }

    #[test]
    fn zero_impression_rows_never_appear() {
        let t = table(&[("d1", "100", "10"), ("d2", "0", "5"), ("d3", "50", "25")]);
        let top = top_creatives(&t).unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].creative, "d3");
        assert_eq!(top[0].ctr, 0.5);
        assert_eq!(top[1].creative, "d1");
        assert_eq!(top[1].ctr, 0.1);
    }

    #[test]
    fn ties_break_by_clicks_then_impressions() {
        // Same ctr of 0.5 everywhere.
        let t = table(&[
            ("low", "10", "5"),
            ("high", "40", "20"),
            ("mid", "20", "10"),
            ("mid2", "20", "10"),
        ]);
        let top = top_creatives(&t).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].creative, "high");
        // clicks tie between mid and mid2 resolves by impressions (also
        // tied), leaving a stable pair in either order but ahead of "low".
        assert!(top[1].creative.starts_with("mid"));
        assert!(top[2].creative.starts_with("mid"));
    }

    #[test]
    fn keeps_at_most_three_entries() {
        let t = table(&[
            ("a", "100", "1"),
            ("b", "100", "2"),
            ("c", "100", "3"),
            ("d", "100", "4"),
        ]);
        let top = top_creatives(&t).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].creative, "d");
        assert_eq!(top[2].creative, "b");
    }

    #[test]
    fn ratio_rounds_to_four_decimals() {
        assert_eq!(round4(1.0 / 3.0), 0.3333);
        assert_eq!(round4(2.0 / 3.0), 0.6667);
        let t = table(&[("a", "3", "1")]);
        assert_eq!(top_creatives(&t).unwrap()[0].ctr, 0.3333);
    }
}
