//! Diagnostic system for the HAL/S front end.
//!
//! Every stage reports problems as [`Diagnostic`] values through a
//! [`DiagnosticSink`]. Recoverable problems are recorded and the stage keeps
//! going; fatal ones are reported with [`DiagnosticSink::fatal`], which hands
//! back an [`Aborted`] proof that the caller propagates with `?`.
//!
//! ```text
//! // Only a sink can mint the proof, so a unit is never aborted silently.
//! let aborted = sink.fatal(Diagnostic::fatal(ErrorCode::E2003).with_message("..."));
//! return Err(aborted);
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::Aborted;
pub use queue::{DiagnosticConfig, DiagnosticQueue};

/// Receiver for diagnostics, in emission order.
pub trait DiagnosticSink {
    /// Record a diagnostic of any severity.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Record a fatal diagnostic and get proof that the unit must stop.
    fn fatal(&mut self, diagnostic: Diagnostic) -> Aborted {
        self.report(diagnostic.with_severity(Severity::Fatal));
        Aborted::new()
    }

    /// Proof that the unit should stop now, for sinks that enforce limits.
    fn abort_requested(&self) -> Option<Aborted> {
        None
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
