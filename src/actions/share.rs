//! Impressions share per gender bucket.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::artifacts::{unique_name, ArtifactStore};
use crate::chart::{ChartRenderer, PieChart, Wedge};
use crate::columns::{coerce_count, require_index, SemanticColumn};
use crate::error::ProcessResult;
use crate::types::Table;

/// Label used for rows whose gender cell is blank or whitespace-only.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// The two `pie` result shapes.
///
/// A zero grand total is an explicit empty-data guard: it returns the
/// inline share shape instead of an artifact, and the asymmetry with
/// [`ShareOutcome::Chart`] is intentional.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShareOutcome {
    /// Chart artifact written for a non-zero grand total.
    Chart {
        /// Name of the image artifact.
        file: String,
    },
    /// Nothing to chart: the grand total was zero.
    Empty {
        /// Always empty; kept for a stable response shape.
        percentages: BTreeMap<String, f64>,
        /// Always zero in this shape.
        total_impressions: u64,
    },
}

/// Group impressions by gender label and chart the shares.
///
/// Blank gender cells fall into the explicit [`UNKNOWN_BUCKET`]. Buckets
/// keep first-appearance order so wedge order is reproducible from the
/// input. With a non-zero grand total, one wedge per bucket (value = bucket
/// total, label = percentage to one decimal, title = grand total) is
/// rendered and persisted as a uniquely named image artifact.
pub fn gender_share(
    table: &Table,
    store: &dyn ArtifactStore,
    renderer: &dyn ChartRenderer,
) -> ProcessResult<ShareOutcome> {
    let impressions_idx = require_index(&table.header, SemanticColumn::Impressions)?;
    let gender_idx = require_index(&table.header, SemanticColumn::Gender)?;

    let buckets = bucket_totals(table, gender_idx, impressions_idx);
    let total: u64 = buckets.iter().map(|(_, v)| v).sum();
    if total == 0 {
        return Ok(ShareOutcome::Empty {
            percentages: BTreeMap::new(),
            total_impressions: 0,
        });
    }

    let wedges = buckets
        .into_iter()
        .map(|(label, value)| Wedge {
            label,
            percent: percent_of(value, total),
            value,
        })
        .collect();
    let chart = PieChart {
        title: format!("Total impressions: {total}"),
        wedges,
    };

    let bytes = renderer.render(&chart)?;
    let name = unique_name("gender_share", renderer.extension());
    let file = store.put(&name, &bytes)?;
    Ok(ShareOutcome::Chart { file })
}

/// Per-bucket impression totals in first-appearance order.
fn bucket_totals(table: &Table, gender_idx: usize, impressions_idx: usize) -> Vec<(String, u64)> {
    let mut buckets: Vec<(String, u64)> = Vec::new();
    for row in 0..table.row_count() {
        let raw = table.cell(row, gender_idx).trim();
        let label = if raw.is_empty() { UNKNOWN_BUCKET } else { raw };
        let count = coerce_count(table.cell(row, impressions_idx));

        match buckets.iter_mut().find(|(name, _)| name == label) {
            Some((_, sum)) => *sum += count,
            None => buckets.push((label.to_string(), count)),
        }
    }
    buckets
}

/// Share of `total`, as a percentage rounded to one decimal place.
fn percent_of(value: u64, total: u64) -> f64 {
    (value as f64 * 1000.0 / total as f64).round() / 10.0
}
