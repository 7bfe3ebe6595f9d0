//! Action dispatch: the closed set of transforms over uploaded tables.
//!
//! Each request selects exactly one [`Action`]; [`process`] parses the
//! upload(s), resolves semantic columns where the action needs them, and
//! runs the matching transform. Handlers live one per module (like
//! [`sum`]/[`share`]/[`ctr`]/…) and stay independently testable; the only
//! branch on the action value is the single match in [`process`].
//!
//! Requests are processed synchronously and independently. There is no
//! shared mutable state across requests beyond the artifact namespace,
//! where the random name suffix avoids collisions.

pub mod observability;

mod ctr;
mod encoding_fix;
mod merge;
mod share;
mod split;
mod sum;

pub use ctr::{top_creatives, CreativeCtr};
pub use encoding_fix::to_utf8_bom;
pub use merge::merge_tables;
pub use observability::{
    CompositeObserver, FileObserver, ProcessContext, ProcessObserver, ProcessSeverity,
    ProcessStats, StdErrObserver,
};
pub use share::{gender_share, ShareOutcome, UNKNOWN_BUCKET};
pub use split::split_by_count;
pub use sum::total_impressions;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactStore;
use crate::chart::{ChartRenderer, SvgPieRenderer};
use crate::error::{ProcessError, ProcessResult};
use crate::ingestion::parse_table;

/// The closed set of operations a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Total the impressions column.
    Sum,
    /// Impressions share per gender bucket, charted.
    Pie,
    /// Top creatives ranked by click-through ratio.
    CtrTop,
    /// Re-encode the upload as UTF-8 with a byte-order marker.
    FixEncoding,
    /// Split the body into fixed-size chunks.
    #[serde(rename = "split_1000")]
    Split,
    /// Concatenate two files with identical headers.
    Merge,
}

impl Action {
    /// Wire name used by the transport layer's action selector.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Pie => "pie",
            Self::CtrTop => "ctr_top",
            Self::FixEncoding => "fix_encoding",
            Self::Split => "split_1000",
            Self::Merge => "merge",
        }
    }

    /// Parse a wire name.
    ///
    /// Anything outside the closed set is [`ProcessError::UnsupportedAction`].
    pub fn from_name(name: &str) -> ProcessResult<Self> {
        match name {
            "sum" => Ok(Self::Sum),
            "pie" => Ok(Self::Pie),
            "ctr_top" => Ok(Self::CtrTop),
            "fix_encoding" => Ok(Self::FixEncoding),
            "split_1000" => Ok(Self::Split),
            "merge" => Ok(Self::Merge),
            other => Err(ProcessError::UnsupportedAction {
                name: other.to_owned(),
            }),
        }
    }
}

/// Per-action result shape, serialized under the wire `action` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// `sum`: total impressions.
    Sum {
        /// Sum of the coerced impressions column.
        impressions_total: u64,
    },
    /// `pie`: chart artifact, or the inline empty shape for a zero total.
    Pie(ShareOutcome),
    /// `ctr_top`: up to three ranked creatives.
    CtrTop {
        /// Ranked entries, best first.
        top3: Vec<CreativeCtr>,
    },
    /// `fix_encoding`: the rewritten file.
    FixEncoding {
        /// Name of the UTF-8 artifact.
        file: String,
    },
    /// `split_1000`: one artifact per chunk.
    #[serde(rename = "split_1000")]
    Split {
        /// Artifact names in chunk order.
        files: Vec<String>,
        /// Number of chunks written.
        parts: usize,
    },
    /// `merge`: the concatenated file.
    Merge {
        /// Name of the merged artifact.
        file: String,
        /// Combined body row count.
        rows_total: usize,
    },
}

impl ActionOutcome {
    /// Names of artifacts written for this outcome, in write order.
    pub fn artifact_names(&self) -> Vec<&str> {
        match self {
            Self::Sum { .. } | Self::CtrTop { .. } | Self::Pie(ShareOutcome::Empty { .. }) => {
                Vec::new()
            }
            Self::Pie(ShareOutcome::Chart { file })
            | Self::FixEncoding { file }
            | Self::Merge { file, .. } => vec![file.as_str()],
            Self::Split { files, .. } => files.iter().map(String::as_str).collect(),
        }
    }
}

/// Options controlling action processing.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ProcessOptions {
    /// Maximum body rows per split artifact.
    pub split_chunk_rows: usize,
    /// Renderer used for the share-chart artifact.
    pub chart_renderer: Arc<dyn ChartRenderer>,
    /// Optional observer for run outcomes.
    pub observer: Option<Arc<dyn ProcessObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ProcessSeverity,
}

impl fmt::Debug for ProcessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessOptions")
            .field("split_chunk_rows", &self.split_chunk_rows)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            split_chunk_rows: 1000,
            chart_renderer: Arc::new(SvgPieRenderer),
            observer: None,
            alert_at_or_above: ProcessSeverity::Critical,
        }
    }
}

/// An owned unit of work: one action plus its upload(s).
#[derive(Clone)]
pub struct ProcessRequest {
    /// The selected action.
    pub action: Action,
    /// Primary upload.
    pub file: Option<Vec<u8>>,
    /// Second upload, required by [`Action::Merge`] only.
    pub file2: Option<Vec<u8>>,
}

impl fmt::Debug for ProcessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessRequest")
            .field("action", &self.action)
            .field("file_len", &self.file.as_ref().map(Vec::len))
            .field("file2_len", &self.file2.as_ref().map(Vec::len))
            .finish()
    }
}

impl ProcessRequest {
    /// Create a request with a primary upload.
    pub fn new(action: Action, file: Vec<u8>) -> Self {
        Self {
            action,
            file: Some(file),
            file2: None,
        }
    }

    /// Attach the second upload (for [`Action::Merge`]).
    pub fn with_second_file(mut self, bytes: Vec<u8>) -> Self {
        self.file2 = Some(bytes);
        self
    }

    /// Execute the request by calling [`process`].
    pub fn run(
        &self,
        store: &dyn ArtifactStore,
        options: &ProcessOptions,
    ) -> ProcessResult<ActionOutcome> {
        process(self, store, options)
    }
}

/// Run `request` against `store`.
///
/// Every failure is detected before any artifact is written and surfaces as
/// a single structured [`ProcessError`]; the operations are deterministic,
/// so nothing is retried. When an observer is configured, this function
/// reports:
///
/// - `on_success` on success, with artifact stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ## Total a column
///
/// ```
/// use csv_report_actions::actions::{process, Action, ActionOutcome, ProcessOptions, ProcessRequest};
/// use csv_report_actions::artifacts::MemoryArtifactStore;
///
/// # fn main() -> Result<(), csv_report_actions::ProcessError> {
/// let csv = "date,impressions\n2024-06-01,\"1,000\"\n2024-06-02,250\n";
/// let store = MemoryArtifactStore::new();
///
/// let request = ProcessRequest::new(Action::Sum, csv.as_bytes().to_vec());
/// let outcome = process(&request, &store, &ProcessOptions::default())?;
/// assert_eq!(outcome, ActionOutcome::Sum { impressions_total: 1250 });
/// # Ok(())
/// # }
/// ```
///
/// ## Rank creatives by click-through ratio
///
/// ```
/// use csv_report_actions::actions::{process, Action, ActionOutcome, ProcessOptions, ProcessRequest};
/// use csv_report_actions::artifacts::MemoryArtifactStore;
///
/// # fn main() -> Result<(), csv_report_actions::ProcessError> {
/// let csv = "creative,impressions,clicks\nd1,100,10\nd2,0,5\nd3,50,25\n";
/// let store = MemoryArtifactStore::new();
///
/// let request = ProcessRequest::new(Action::CtrTop, csv.as_bytes().to_vec());
/// let ActionOutcome::CtrTop { top3 } = process(&request, &store, &ProcessOptions::default())?
/// else {
///     unreachable!()
/// };
/// assert_eq!(top3.len(), 2);
/// assert_eq!(top3[0].creative, "d3");
/// # Ok(())
/// # }
/// ```
pub fn process(
    request: &ProcessRequest,
    store: &dyn ArtifactStore,
    options: &ProcessOptions,
) -> ProcessResult<ActionOutcome> {
    let ctx = ProcessContext {
        action: request.action,
    };

    let result = dispatch(request, store, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(outcome) => obs.on_success(
                &ctx,
                ProcessStats {
                    artifacts: outcome.artifact_names().len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn dispatch(
    request: &ProcessRequest,
    store: &dyn ArtifactStore,
    options: &ProcessOptions,
) -> ProcessResult<ActionOutcome> {
    let file = request
        .file
        .as_deref()
        .ok_or(ProcessError::MissingFile { which: "file" })?;

    match request.action {
        Action::Sum => {
            let table = parse_table(file)?;
            Ok(ActionOutcome::Sum {
                impressions_total: sum::total_impressions(&table)?,
            })
        }
        Action::Pie => {
            let table = parse_table(file)?;
            let outcome = share::gender_share(&table, store, options.chart_renderer.as_ref())?;
            Ok(ActionOutcome::Pie(outcome))
        }
        Action::CtrTop => {
            let table = parse_table(file)?;
            Ok(ActionOutcome::CtrTop {
                top3: ctr::top_creatives(&table)?,
            })
        }
        Action::FixEncoding => Ok(ActionOutcome::FixEncoding {
            file: encoding_fix::to_utf8_bom(file, store)?,
        }),
        Action::Split => {
            let table = parse_table(file)?;
            let files = split::split_by_count(&table, options.split_chunk_rows, store)?;
            Ok(ActionOutcome::Split {
                parts: files.len(),
                files,
            })
        }
        Action::Merge => {
            let second = request
                .file2
                .as_deref()
                .ok_or(ProcessError::MissingFile { which: "file2" })?;
            let (file, rows_total) =
                merge::merge_tables(&parse_table(file)?, &parse_table(second)?, store)?;
            Ok(ActionOutcome::Merge { file, rows_total })
        }
    }
}

fn severity_for_error(e: &ProcessError) -> ProcessSeverity {
    match e {
        ProcessError::Io(_) => ProcessSeverity::Critical,
        ProcessError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ProcessSeverity::Critical,
            _ => ProcessSeverity::Error,
        },
        ProcessError::MissingFile { .. }
        | ProcessError::UnsupportedEncoding
        | ProcessError::ColumnNotFound { .. }
        | ProcessError::EmptyInput
        | ProcessError::HeaderMismatch { .. }
        | ProcessError::UnsupportedAction { .. } => ProcessSeverity::Error,
    }
}
