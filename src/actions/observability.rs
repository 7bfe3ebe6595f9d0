use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ProcessError;

use super::Action;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProcessSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the action failed on its input).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about one action run.
#[derive(Debug, Clone)]
pub struct ProcessContext {
    /// The action selected by the request.
    pub action: Action,
}

/// Minimal stats reported on a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    /// Number of output artifacts written.
    pub artifacts: usize,
}

/// Observer interface for action run outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ProcessObserver: Send + Sync {
    /// Called when an action run succeeds.
    fn on_success(&self, _ctx: &ProcessContext, _stats: ProcessStats) {}

    /// Called when an action run fails.
    fn on_failure(&self, _ctx: &ProcessContext, _severity: ProcessSeverity, _error: &ProcessError) {}

    /// Called when a failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ProcessContext, severity: ProcessSeverity, error: &ProcessError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ProcessObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ProcessObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ProcessObserver for CompositeObserver {
    fn on_success(&self, ctx: &ProcessContext, stats: ProcessStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ProcessContext, severity: ProcessSeverity, error: &ProcessError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ProcessContext, severity: ProcessSeverity, error: &ProcessError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs action run events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ProcessObserver for StdErrObserver {
    fn on_success(&self, ctx: &ProcessContext, stats: ProcessStats) {
        eprintln!(
            "[action][ok] action={} artifacts={}",
            ctx.action.name(),
            stats.artifacts
        );
    }

    fn on_failure(&self, ctx: &ProcessContext, severity: ProcessSeverity, error: &ProcessError) {
        eprintln!(
            "[action][{:?}] action={} err={}",
            severity,
            ctx.action.name(),
            error
        );
    }

    fn on_alert(&self, ctx: &ProcessContext, severity: ProcessSeverity, error: &ProcessError) {
        eprintln!(
            "[ALERT][action][{:?}] action={} err={}",
            severity,
            ctx.action.name(),
            error
        );
    }
}

/// Appends action run events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ProcessObserver for FileObserver {
    fn on_success(&self, ctx: &ProcessContext, stats: ProcessStats) {
        self.append_line(&format!(
            "{} ok action={} artifacts={}",
            unix_ts(),
            ctx.action.name(),
            stats.artifacts
        ));
    }

    fn on_failure(&self, ctx: &ProcessContext, severity: ProcessSeverity, error: &ProcessError) {
        self.append_line(&format!(
            "{} fail severity={:?} action={} err={}",
            unix_ts(),
            severity,
            ctx.action.name(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ProcessContext, severity: ProcessSeverity, error: &ProcessError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} action={} err={}",
            unix_ts(),
            severity,
            ctx.action.name(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
