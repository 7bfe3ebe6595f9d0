//! Upload parsing: raw uploaded bytes into an in-memory [`crate::types::Table`].
//!
//! Parsing is a two-step pipeline:
//!
//! - decode the byte stream via [`crate::encoding::SourceEncoding`] (marker,
//!   plain UTF-8, Shift_JIS, in that order)
//! - tokenize the decoded text as CSV, keeping header and cells literal
//!
//! Whole files are materialized in memory; uploads here are bounded report
//! exports, not arbitrarily large streams.

pub mod csv;

pub use csv::{parse_table, parse_table_str};
