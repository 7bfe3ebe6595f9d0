//! Impressions total.

use crate::columns::{coerce_count, require_index, SemanticColumn};
use crate::error::ProcessResult;
use crate::types::Table;

/// Sum the coerced impressions cell of every row.
///
/// An empty body is a total of 0, not an error.
pub fn total_impressions(table: &Table) -> ProcessResult<u64> {
    let idx = require_index(&table.header, SemanticColumn::Impressions)?;
    Ok((0..table.row_count())
        .map(|row| coerce_count(table.cell(row, idx)))
        .sum())
}
