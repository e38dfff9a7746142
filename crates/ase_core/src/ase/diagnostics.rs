//! Line-tagged diagnostics emitted while parsing.
//!
//! Warnings never change control flow; the parser reports them and carries
//! on. Fatal errors are reported here as well before the parse is aborted.

use std::fmt;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable anomaly, parsing continues
    Warning,
    /// Fatal syntax violation, parsing aborts
    Error,
}

/// A single diagnostic message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Receiver for parser diagnostics.
pub trait DiagnosticSink {
    /// Handle one diagnostic. `source` is the display name of the input.
    fn report(&mut self, source: &str, diagnostic: &Diagnostic);
}

/// Sink that forwards diagnostics to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, source: &str, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => log::warn!("{}: {}", source, diagnostic),
            Severity::Error => log::error!("{}: {}", source, diagnostic),
        }
    }
}

/// Sink that keeps every diagnostic in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings, in the order they were reported.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// All fatal errors (at most one per parse).
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, _source: &str, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(line: usize, message: &str) -> Diagnostic {
        Diagnostic {
            severity: Severity::Warning,
            line,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_display_prefixes_line() {
        assert_eq!(warning(12, "Vertex has an invalid index").to_string(), "Line 12: Vertex has an invalid index");
    }

    #[test]
    fn test_collecting_sink_separates_severities() {
        let mut sink = CollectingSink::new();
        sink.report("a.ase", &warning(1, "first"));
        sink.report(
            "a.ase",
            &Diagnostic {
                severity: Severity::Error,
                line: 2,
                message: "fatal".to_string(),
            },
        );
        sink.report("a.ase", &warning(3, "second"));

        assert_eq!(sink.warning_count(), 2);
        assert_eq!(sink.errors().count(), 1);
        let lines: Vec<usize> = sink.warnings().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_log_sink_accepts_both_severities() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut sink = LogSink;
        sink.report("a.ase", &warning(1, "logged"));
        sink.report(
            "a.ase",
            &Diagnostic {
                severity: Severity::Error,
                line: 1,
                message: "logged".to_string(),
            },
        );
    }
}
