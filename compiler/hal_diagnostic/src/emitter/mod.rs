//! Plain-text diagnostic rendering.
//!
//! Unlike `Diagnostic`'s `Display`, the emitter resolves each label's
//! source id through a [`SourceMap`] so listings name files and members.

use std::io::{self, Write};

use hal_ir::SourceMap;

use crate::{Diagnostic, Severity};

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Writes diagnostics as text to any writer.
pub struct TextEmitter<'a, W: Write> {
    writer: W,
    sources: &'a SourceMap,
}

impl<'a, W: Write> TextEmitter<'a, W> {
    pub fn new(writer: W, sources: &'a SourceMap) -> Self {
        TextEmitter { writer, sources }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_diagnostic(&mut self, diag: &Diagnostic) -> io::Result<()> {
        writeln!(self.writer, "{} [{}]: {}", diag.severity, diag.code, diag.message)?;
        for label in &diag.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            writeln!(
                self.writer,
                "  {} {}: {}",
                marker,
                self.sources.describe(label.location),
                label.message
            )?;
        }
        for note in &diag.notes {
            writeln!(self.writer, "  = note: {note}")?;
        }
        Ok(())
    }
}

impl<W: Write> DiagnosticEmitter for TextEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Diagnostics go to a terminal or buffer; a failed write has nowhere to be reported.
        let _ = self.write_diagnostic(diagnostic);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        let _ = match (error_count, warning_count) {
            (0, 0) => Ok(()),
            (0, w) => writeln!(self.writer, "{w} warning{}", plural(w)),
            (e, 0) => writeln!(self.writer, "{e} error{}", plural(e)),
            (e, w) => writeln!(
                self.writer,
                "{e} error{}, {w} warning{}",
                plural(e),
                plural(w)
            ),
        };
    }
}

/// Count diagnostics at or above `severity`.
pub fn count_at_least(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity >= severity).count()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
