//! Semantic column resolution and lenient cell coercion.
//!
//! Report files spell the same logical column many ways ("impressions",
//! "IMP", "インプレッション数", …). Each [`SemanticColumn`] carries a fixed
//! alias set and a fragment list; resolution is a pure function over those
//! tables, so new spellings are added here without touching any transform.

use std::fmt;

use crate::error::{ProcessError, ProcessResult};

/// A logical report column that may appear under many literal spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticColumn {
    /// Delivered ad impressions.
    Impressions,
    /// Registered clicks.
    Clicks,
    /// Audience gender label.
    Gender,
    /// Creative (ad variant) name.
    Creative,
}

impl SemanticColumn {
    /// Lower-cased exact aliases, checked before any substring match.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Impressions => &[
                "impressions",
                "impression",
                "imps",
                "imp",
                "表示回数",
                "インプレッション数",
                "インプレッション",
            ],
            Self::Clicks => &["clicks", "click", "clk", "クリック数", "クリック"],
            Self::Gender => &["gender", "sex", "性別"],
            Self::Creative => &[
                "creative",
                "creative name",
                "creative_name",
                "ad name",
                "ad_name",
                "クリエイティブ",
                "広告名",
            ],
        }
    }

    /// Substring fragments used when no exact alias matches.
    pub fn fragments(self) -> &'static [&'static str] {
        match self {
            Self::Impressions => &["impression", "imp", "インプ", "表示"],
            Self::Clicks => &["click", "clk", "クリック"],
            Self::Gender => &["gender", "sex", "性別"],
            Self::Creative => &["creative", "クリエイティブ", "広告", "banner", "バナー"],
        }
    }
}

impl fmt::Display for SemanticColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Impressions => "impressions",
            Self::Clicks => "clicks",
            Self::Gender => "gender",
            Self::Creative => "creative",
        };
        f.write_str(name)
    }
}

/// Resolve `column` against literal `header` names.
///
/// Two passes, both first-match-in-header-order:
///
/// - exact: case-insensitive comparison of each trimmed header against the
///   alias set;
/// - substring: first header whose lower-cased form contains any fragment.
///
/// Returns the literal header exactly as it appears in the file. The
/// first-in-order tie-break keeps resolution deterministic across runs.
pub fn resolve_column(header: &[String], column: SemanticColumn) -> Option<&str> {
    resolve_index(header, column).map(|idx| header[idx].as_str())
}

/// Like [`resolve_column`], but returns the column index and turns absence
/// into a [`ProcessError::ColumnNotFound`] echoing every header seen.
pub fn require_index(header: &[String], column: SemanticColumn) -> ProcessResult<usize> {
    resolve_index(header, column).ok_or_else(|| ProcessError::ColumnNotFound {
        column,
        headers: header.to_vec(),
    })
}

fn resolve_index(header: &[String], column: SemanticColumn) -> Option<usize> {
    let lowered: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();

    for (idx, low) in lowered.iter().enumerate() {
        if column.aliases().iter().any(|alias| low == alias) {
            return Some(idx);
        }
    }
    for (idx, low) in lowered.iter().enumerate() {
        if column.fragments().iter().any(|frag| low.contains(frag)) {
            return Some(idx);
        }
    }
    None
}

/// Coerce a raw cell into a non-negative count.
///
/// Trims surrounding whitespace, strips thousands separators (ASCII and
/// full-width comma), parses as a real number, truncates toward zero, and
/// clamps below at zero. Unparseable or empty input is 0: malformed cells
/// contribute nothing instead of failing the whole action.
pub fn coerce_count(raw: &str) -> u64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '，')
        .collect();
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}
