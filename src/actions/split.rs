//! Fixed-size splitting of a table body.

use crate::artifacts::{unique_name, ArtifactStore};
use crate::error::{ProcessError, ProcessResult};
use crate::types::Table;

/// Partition the body into consecutive chunks of at most `chunk_rows` rows
/// and write one artifact per chunk.
///
/// Each artifact is the original header followed by its chunk; row order is
/// preserved within and across chunks, so concatenating all artifact bodies
/// in order reproduces the original body. A table with no body rows (or no
/// header at all) is [`ProcessError::EmptyInput`]. All chunks are
/// serialized before the first write.
///
/// # Panics
///
/// Panics if `chunk_rows == 0`.
pub fn split_by_count(
    table: &Table,
    chunk_rows: usize,
    store: &dyn ArtifactStore,
) -> ProcessResult<Vec<String>> {
    assert!(chunk_rows > 0, "chunk_rows must be > 0");

    if table.header.is_empty() || table.rows.is_empty() {
        return Err(ProcessError::EmptyInput);
    }

    let mut parts = Vec::with_capacity(table.rows.len().div_ceil(chunk_rows));
    for (i, chunk) in table.rows.chunks(chunk_rows).enumerate() {
        parts.push((unique_name(&format!("part{}", i + 1), "csv"), table.csv_bytes(chunk)?));
    }

    let mut files = Vec::with_capacity(parts.len());
    for (name, bytes) in parts {
        files.push(store.put(&name, &bytes)?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::split_by_count;
    use crate::artifacts::MemoryArtifactStore;
    use crate::types::Table;

    fn table_of(n: usize) -> Table {
        Table::new(
            vec!["id".to_string()],
            (0..n).map(|i| vec![i.to_string()]).collect(),
        )
    }

    #[test]
    fn chunk_count_is_ceil_of_rows_over_chunk_size() {
        let store = MemoryArtifactStore::new();
        let files = split_by_count(&table_of(7), 3, &store).unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn an_exact_multiple_has_no_trailing_empty_chunk() {
        let store = MemoryArtifactStore::new();
        let files = split_by_count(&table_of(6), 3, &store).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn empty_body_is_rejected_before_any_write() {
        let store = MemoryArtifactStore::new();
        let err = split_by_count(&table_of(0), 3, &store).unwrap_err();
        assert_eq!(err.kind(), "empty_input");
        assert!(store.is_empty());
    }

    #[test]
    fn missing_header_is_rejected() {
        let store = MemoryArtifactStore::new();
        let t = Table::new(Vec::new(), Vec::new());
        assert_eq!(
            split_by_count(&t, 3, &store).unwrap_err().kind(),
            "empty_input"
        );
    }
}
