//! Error sinks: where the codec reports the failures it swallows.

use std::fmt;

use parking_lot::Mutex;

use crate::error::CodecError;

/// Receives every failure the codec converts into a fallback value.
///
/// Reporting is fire-and-forget: the codec's return value never depends on
/// what the sink does.
pub trait ErrorSink: fmt::Debug + Send + Sync {
    /// Record that `operation` failed with `error`.
    fn report(&self, operation: &str, error: &CodecError);
}

/// Logs failures through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, operation: &str, error: &CodecError) {
        tracing::error!(operation, kind = error.kind(), error = %error, "XML codec operation failed");
    }
}

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The codec operation that failed.
    pub operation: String,
    /// The [`CodecError::kind`] of the failure.
    pub kind: &'static str,
    /// The rendered error message.
    pub message: String,
}

/// Keeps failures in memory so callers can inspect or surface them later.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<Report>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded failures, oldest first.
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    /// The most recent failure.
    #[must_use]
    pub fn last(&self) -> Option<Report> {
        self.reports.lock().last().cloned()
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    /// Whether no failure has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    /// Drop all recorded failures.
    pub fn clear(&self) {
        self.reports.lock().clear();
    }
}

impl ErrorSink for MemorySink {
    fn report(&self, operation: &str, error: &CodecError) {
        self.reports.lock().push(Report {
            operation: operation.to_owned(),
            kind: error.kind(),
            message: error.to_string(),
        });
    }
}
