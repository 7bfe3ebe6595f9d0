//! Core data model for uploaded report files.
//!
//! Uploads are parsed into an in-memory [`Table`]: the literal header row
//! plus raw string body rows. Cells stay untyped; numeric interpretation is
//! action-specific and lenient (see [`crate::columns::coerce_count`]), and
//! the split/merge actions must reproduce body rows exactly as they
//! arrived.

use crate::error::ProcessResult;

/// In-memory tabular file.
///
/// The header keeps column names exactly as they appear in the file, in
/// file order. Rows are positionally aligned with the header and row order
/// is significant: split and merge preserve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Ordered literal column names.
    pub header: Vec<String>,
    /// Row-major raw cell storage, aligned with `header`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from a header and body rows.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Number of body rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by its literal name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// The cell at (`row`, `col`), or `""` when the row is shorter than the
    /// header.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// Serialize the header followed by `rows` back into CSV bytes.
    ///
    /// `rows` is a caller-selected slice of body rows (a split chunk, a
    /// merged body), so one table can produce several artifacts.
    pub fn csv_bytes(&self, rows: &[Vec<String>]) -> ProcessResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            wtr.write_record(&self.header)?;
            for row in rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        Ok(buf)
    }
}
