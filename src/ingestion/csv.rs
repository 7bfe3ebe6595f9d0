//! CSV tokenization of decoded uploads.

use crate::encoding::SourceEncoding;
use crate::error::ProcessResult;
use crate::types::Table;

/// Parse an uploaded byte stream into a [`Table`].
///
/// Rules:
///
/// - encoding is detected via [`SourceEncoding::decode`];
/// - the first record is the header, kept literally (original case/order);
/// - records are flexible: short rows are padded with empty cells to the
///   header width, surplus cells beyond the header are dropped;
/// - cells are not trimmed, so split/merge reproduce body rows exactly.
pub fn parse_table(bytes: &[u8]) -> ProcessResult<Table> {
    let (_, text) = SourceEncoding::decode(bytes)?;
    parse_table_str(&text)
}

/// Parse already-decoded CSV text into a [`Table`].
pub fn parse_table_str(text: &str) -> ProcessResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    let width = header.len();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().take(width).map(str::to_owned).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(Table::new(header, rows))
}

#[cfg(test)]
mod tests {
    use super::{parse_table, parse_table_str};

    #[test]
    fn parses_header_and_rows_literally() {
        let t = parse_table_str("Date,Impressions\n2024-06-01, 100\n").unwrap();
        assert_eq!(t.header, vec!["Date", "Impressions"]);
        assert_eq!(t.rows, vec![vec!["2024-06-01".to_string(), " 100".to_string()]]);
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let t = parse_table_str("a,b\n1\n1,2,3\n").unwrap();
        assert_eq!(t.rows[0], vec!["1".to_string(), String::new()]);
        assert_eq!(t.rows[1], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn empty_input_yields_an_empty_table() {
        let t = parse_table(b"").unwrap();
        assert!(t.header.is_empty());
        assert_eq!(t.row_count(), 0);
    }

    #[test]
    fn shift_jis_uploads_decode_before_tokenization() {
        let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode("性別,表示回数\n男性,100\n");
        assert!(!had_errors);
        let t = parse_table(&bytes).unwrap();
        assert_eq!(t.header, vec!["性別", "表示回数"]);
        assert_eq!(t.rows, vec![vec!["男性".to_string(), "100".to_string()]]);
    }
}
