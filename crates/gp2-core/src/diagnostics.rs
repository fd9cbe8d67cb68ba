//! Diagnostic sinks.
//!
//! `tracing` is the always-on observability sink, plus a hand-rolled
//! embedder-facing trait for an optional console stream. The log stream
//! fires unconditionally via [`tracing`]; the console stream is opt-in — an
//! embedder implements [`Reporter`] and passes `Some(&reporter)` wherever
//! an operation accepts one.

use std::fmt;

use gp2_common::Error;

/// Severity of a single diagnostic, mirroring [`tracing::Level`]'s
/// warn/error split — only failures are ever reported, never `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A rejected operation that left the graph unchanged (e.g.
    /// `dangling-incidence`, `limit-exceeded`).
    Warning,
    /// A detected invariant violation — the graph's own bookkeeping
    /// disagreed with itself.
    Error,
}

/// A single diagnostic emitted by a core operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious this diagnostic is.
    pub severity: Severity,
    /// Human-readable message, generally an [`Error`]'s `Display` text.
    pub message: String,
}

impl Diagnostic {
    /// Builds a diagnostic from an [`Error`], classifying its severity.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        let severity = match error {
            Error::InvariantViolation(_) => Severity::Error,
            _ => Severity::Warning,
        };
        Self {
            severity,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// An embedder-supplied console sink. The core never assumes a terminal
/// exists; implementors decide where a [`Diagnostic`] actually goes
/// (stderr, a GUI log pane, a test-capturing `Vec`).
pub trait Reporter {
    /// Handles one diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Emits `diagnostic` to the log stream ([`tracing`]) unconditionally, and
/// to `reporter`'s console stream if one was supplied.
pub fn emit(diagnostic: &Diagnostic, reporter: Option<&dyn Reporter>) {
    match diagnostic.severity {
        Severity::Warning => tracing::warn!(message = %diagnostic.message),
        Severity::Error => tracing::error!(message = %diagnostic.message),
    }
    if let Some(reporter) = reporter {
        reporter.report(diagnostic);
    }
}

/// Convenience: builds a [`Diagnostic`] from `error` and emits it.
pub fn emit_error(error: &Error, reporter: Option<&dyn Reporter>) {
    emit(&Diagnostic::from_error(error), reporter);
}

/// A [`Reporter`] that collects diagnostics into a `Vec`, for tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    records: std::sync::Mutex<Vec<Diagnostic>>,
}

impl RecordingReporter {
    /// A fresh, empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every diagnostic recorded so far, in emission order.
    #[must_use]
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.records
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_violation_is_reported_as_error_severity() {
        let err = Error::InvariantViolation("broken".into());
        let diagnostic = Diagnostic::from_error(&err);
        assert_eq!(diagnostic.severity, Severity::Error);
    }

    #[test]
    fn dangling_incidence_is_reported_as_warning_severity() {
        let err = Error::DanglingIncidence { index: 0, degree: 1 };
        let diagnostic = Diagnostic::from_error(&err);
        assert_eq!(diagnostic.severity, Severity::Warning);
    }

    #[test]
    fn recording_reporter_collects_in_order() {
        let reporter = RecordingReporter::new();
        emit_error(&Error::OutOfRange { index: 5, len: 2 }, Some(&reporter));
        emit_error(&Error::InvariantViolation("x".into()), Some(&reporter));

        let records = reporter.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, Severity::Warning);
        assert_eq!(records[1].severity, Severity::Error);
    }
}
