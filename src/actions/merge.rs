//! Concatenation of two structurally identical tables.

use crate::artifacts::{unique_name, ArtifactStore};
use crate::error::{ProcessError, ProcessResult};
use crate::types::Table;

/// Concatenate `first` and `second` under their shared header.
///
/// Rules:
///
/// - either table without body rows is [`ProcessError::EmptyInput`];
/// - the header sequences must be exactly equal (same names, same order,
///   same count); this is a strict structural check, not a semantic one;
/// - the artifact is the header, then all of `first`'s body, then all of
///   `second`'s, in that order.
///
/// Returns the artifact name and the combined body row count.
pub fn merge_tables(
    first: &Table,
    second: &Table,
    store: &dyn ArtifactStore,
) -> ProcessResult<(String, usize)> {
    if first.rows.is_empty() || second.rows.is_empty() {
        return Err(ProcessError::EmptyInput);
    }
    if first.header != second.header {
        return Err(ProcessError::HeaderMismatch {
            left: first.header.clone(),
            right: second.header.clone(),
        });
    }

    let rows_total = first.row_count() + second.row_count();
    let mut body = Vec::with_capacity(rows_total);
    body.extend_from_slice(&first.rows);
    body.extend_from_slice(&second.rows);

    let bytes = first.csv_bytes(&body)?;
    let name = unique_name("merged", "csv");
    let file = store.put(&name, &bytes)?;
    Ok((file, rows_total))
}
