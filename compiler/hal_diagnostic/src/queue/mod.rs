//! Diagnostic queue for collecting diagnostics in emission order.
//!
//! Features:
//! - Error limits to stop a unit that produces too much noise
//! - Deduplication of identical diagnostics
//! - Counts per severity
//! - `Aborted` proof once a fatal diagnostic is recorded

use crate::{Aborted, Diagnostic, DiagnosticSink, ErrorCode, Severity};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of recoverable errors before the unit is aborted (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical to one already recorded.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    pub fn unlimited() -> Self {
        DiagnosticConfig::default()
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }
}

/// Collects diagnostics in the order they are reported.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    config: DiagnosticConfig,
    error_count: usize,
    warning_count: usize,
    fatal: bool,
    limit_hit: bool,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        DiagnosticQueue::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..DiagnosticQueue::default()
        }
    }

    fn is_duplicate(&self, diag: &Diagnostic) -> bool {
        self.config.deduplicate && self.diagnostics.iter().rev().any(|d| d == diag)
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Recoverable and fatal errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_fatal(&self) -> bool {
        self.fatal
    }

    /// Proof of abortion if a fatal diagnostic has been recorded.
    pub fn aborted(&self) -> Option<Aborted> {
        self.fatal.then(Aborted::new)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&mut self, diagnostic: Diagnostic) {
        if self.is_duplicate(&diagnostic) {
            return;
        }
        // Once the limit fired only fatal diagnostics still get through.
        if self.limit_hit && !diagnostic.is_fatal() {
            return;
        }

        match diagnostic.severity {
            Severity::Fatal => {
                self.fatal = true;
                self.error_count += 1;
            }
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => {}
        }
        let location = diagnostic.primary_location();
        self.diagnostics.push(diagnostic);

        if !self.limit_hit && !self.fatal && self.limit_reached() {
            self.limit_hit = true;
            let limit = too_many_errors(self.config.error_limit);
            let limit = match location {
                Some(location) => limit.with_label(location, "error limit reached here"),
                None => limit,
            };
            self.report(limit);
        }
    }

    fn abort_requested(&self) -> Option<Aborted> {
        self.aborted()
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
pub fn too_many_errors(limit: usize) -> Diagnostic {
    Diagnostic::fatal(ErrorCode::E9001)
        .with_message(format!("aborting after {limit} errors"))
        .with_note("use --error-limit to raise the limit")
}

#[cfg(test)]
mod tests;
