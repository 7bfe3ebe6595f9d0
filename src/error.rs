use thiserror::Error;

use crate::columns::SemanticColumn;

/// Convenience result type for action processing.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Error type returned by the action engine.
///
/// This is a single error enum shared across parsing, column resolution, and
/// all six actions. Every failure is detected before any output artifact is
/// written, so a returned error never leaves partial artifacts behind.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Underlying I/O error (e.g. artifact directory not writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse/serialize error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required upload is absent (`file2` is only required for merge).
    #[error("missing upload '{which}'")]
    MissingFile {
        /// Form field name of the absent upload.
        which: &'static str,
    },

    /// The input bytes decode under none of the candidate encodings.
    #[error("unsupported encoding: input is not UTF-8 (with or without marker) or Shift_JIS")]
    UnsupportedEncoding,

    /// A required semantic column could not be resolved against the file's
    /// literal headers. Carries every header seen as a diagnostic aid.
    #[error("no header resolves to required column '{column}'. headers={headers:?}")]
    ColumnNotFound {
        /// The semantic role that failed to resolve.
        column: SemanticColumn,
        /// All literal headers observed in the offending file.
        headers: Vec<String>,
    },

    /// A table has no header/body rows where rows are required.
    #[error("empty input: table has no data rows")]
    EmptyInput,

    /// The two merge inputs differ in header names, order, or count.
    #[error("header mismatch: left={left:?} right={right:?}")]
    HeaderMismatch {
        /// Header sequence of the first file.
        left: Vec<String>,
        /// Header sequence of the second file.
        right: Vec<String>,
    },

    /// The action selector is outside the closed action set.
    #[error("unsupported action '{name}'")]
    UnsupportedAction {
        /// The raw selector value received.
        name: String,
    },
}

impl ProcessError {
    /// Machine-readable error kind for transport-layer responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Csv(_) => "csv",
            Self::MissingFile { .. } => "missing_file",
            Self::UnsupportedEncoding => "unsupported_encoding",
            Self::ColumnNotFound { .. } => "column_not_found",
            Self::EmptyInput => "empty_input",
            Self::HeaderMismatch { .. } => "header_mismatch",
            Self::UnsupportedAction { .. } => "unsupported_action",
        }
    }

    /// Literal headers attached to this error, if it carries any.
    pub fn observed_headers(&self) -> Option<&[String]> {
        match self {
            Self::ColumnNotFound { headers, .. } => Some(headers),
            Self::HeaderMismatch { left, .. } => Some(left),
            _ => None,
        }
    }
}
