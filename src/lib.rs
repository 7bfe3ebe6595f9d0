//! `csv-report-actions` is the action-dispatch core of a CSV report
//! service: one uploaded file (two for merge), one selected [`actions::Action`],
//! one JSON-shaped [`actions::ActionOutcome`] and/or named output artifact.
//!
//! The pipeline per request:
//!
//! - raw upload bytes → [`encoding::SourceEncoding`] (marker, plain UTF-8,
//!   Shift_JIS, probed in that order)
//! - decoded text → [`types::Table`] (literal header + raw string rows)
//! - [`columns`] resolves semantic roles (impressions, clicks, gender,
//!   creative) against the literal headers, exact-alias first, substring
//!   second, always first-in-header-order
//! - the selected action handler consumes the table and produces a result,
//!   writing any artifact through the [`artifacts::ArtifactStore`] capability
//!   under a random-suffixed name
//!
//! ## The six actions
//!
//! | wire name | result |
//! |---|---|
//! | `sum` | total of the coerced impressions column |
//! | `pie` | gender-share chart artifact (inline empty shape when the total is 0) |
//! | `ctr_top` | top 3 creatives by click-through ratio |
//! | `fix_encoding` | upload rewritten as UTF-8 with a byte-order marker |
//! | `split_1000` | body split into chunks of at most 1000 rows, one artifact each |
//! | `merge` | two files with identical headers concatenated |
//!
//! ## Quick example: process a request
//!
//! ```
//! use csv_report_actions::actions::{process, Action, ActionOutcome, ProcessOptions, ProcessRequest};
//! use csv_report_actions::artifacts::MemoryArtifactStore;
//!
//! # fn main() -> Result<(), csv_report_actions::ProcessError> {
//! let csv = "date,impressions\n2024-06-01,\"1,000\"\n2024-06-02,250\n";
//!
//! // Tests and embedders can use the in-memory store; services hand in an
//! // FsArtifactStore rooted at their output directory.
//! let store = MemoryArtifactStore::new();
//! let request = ProcessRequest::new(Action::Sum, csv.as_bytes().to_vec());
//!
//! let outcome = process(&request, &store, &ProcessOptions::default())?;
//! assert_eq!(outcome, ActionOutcome::Sum { impressions_total: 1250 });
//! # Ok(())
//! # }
//! ```
//!
//! ## Fuzzy header resolution
//!
//! Report exports spell columns many ways; resolution is a pure function
//! over per-role alias tables (English and Japanese spellings included):
//!
//! ```
//! use csv_report_actions::columns::{resolve_column, SemanticColumn};
//!
//! let headers: Vec<String> = ["日付", "Impressions", "クリック数"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! assert_eq!(
//!     resolve_column(&headers, SemanticColumn::Impressions),
//!     Some("Impressions")
//! );
//! assert_eq!(
//!     resolve_column(&headers, SemanticColumn::Clicks),
//!     Some("クリック数")
//! );
//! ```
//!
//! ## Modules
//!
//! - [`actions`]: the closed action set, dispatch entry point, observers
//! - [`ingestion`]: upload bytes → [`types::Table`]
//! - [`encoding`]: ordered-preference encoding detection
//! - [`columns`]: semantic column resolution + lenient cell coercion
//! - [`artifacts`]: output artifact storage (filesystem and in-memory)
//! - [`chart`]: share-chart data model and the renderer seam
//! - [`types`]: the in-memory table
//! - [`error`]: error types used across the crate

pub mod actions;
pub mod artifacts;
pub mod chart;
pub mod columns;
pub mod encoding;
pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{ProcessError, ProcessResult};
