//! Diagnostics Sink
//!
//! All human-facing output of the crate flows through an injected
//! [`DiagnosticsSink`]. The default, [`LogSink`], routes reports to the
//! [`log`] facade; tests inject [`CapturingSink`] to assert on (or silence)
//! the exact reports a scenario produces.
//!
//! Every report is tagged with the owning program's id — the file path for
//! file-backed programs, the caller-supplied identifier otherwise.

use parking_lot::Mutex;

/// Severity of a diagnostic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Progress notes (successful reloads).
    Info,
    /// Recoverable conditions (unknown uniform, timestamp query failure).
    Warning,
    /// Failed builds and configuration errors.
    Error,
}

/// Receiver for diagnostic reports.
///
/// Implementations must be cheap to call; the hot path only reaches the
/// sink on state changes (a reload, a first-time unknown uniform), never
/// per frame.
pub trait DiagnosticsSink: Send + Sync {
    /// Deliver one report about the program identified by `id`.
    fn report(&self, severity: Severity, id: &str, message: &str);
}

/// Default sink: forwards to the [`log`] crate.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn report(&self, severity: Severity, id: &str, message: &str) {
        match severity {
            Severity::Info => log::info!("shader `{id}`: {message}"),
            Severity::Warning => log::warn!("shader `{id}`: {message}"),
            Severity::Error => log::error!("shader `{id}`: {message}"),
        }
    }
}

/// Sink that discards every report.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn report(&self, _severity: Severity, _id: &str, _message: &str) {}
}

/// One captured report.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub id: String,
    pub message: String,
}

/// Sink that records every report, for assertions in tests.
#[derive(Debug, Default)]
pub struct CapturingSink {
    reports: Mutex<Vec<Diagnostic>>,
}

impl CapturingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reports captured so far.
    #[must_use]
    pub fn reports(&self) -> Vec<Diagnostic> {
        self.reports.lock().clone()
    }

    /// Number of captured reports with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.reports
            .lock()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any captured message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.reports
            .lock()
            .iter()
            .any(|d| d.message.contains(needle))
    }

    /// Drop all captured reports.
    pub fn clear(&self) {
        self.reports.lock().clear();
    }
}

impl DiagnosticsSink for CapturingSink {
    fn report(&self, severity: Severity, id: &str, message: &str) {
        self.reports.lock().push(Diagnostic {
            severity,
            id: id.to_string(),
            message: message.to_string(),
        });
    }
}
