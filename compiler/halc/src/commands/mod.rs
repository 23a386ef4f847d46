//! Command handlers for the `halc` binary.
//!
//! Each handler takes the arguments after the command name and two
//! writers: listings go to `out`, diagnostics and usage errors to `err`.

use std::io::{self, Write};
use std::process::ExitCode;

use hal_diagnostic::emitter::{count_at_least, DiagnosticEmitter, TextEmitter};
use hal_diagnostic::{Diagnostic, Severity};
use hal_ir::SourceMap;

mod debug;
mod explain;
mod tables;

pub use debug::{lex_command, parse_command};
pub use explain::explain_command;
pub use tables::tables_command;

/// How a command ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    fn from_clean(clean: bool) -> Self {
        if clean {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Run a handler body, turning a failed write into a failed command.
fn finish(result: io::Result<Status>) -> Status {
    result.unwrap_or(Status::Failure)
}

/// Write diagnostics in emission order, then the error/warning summary.
fn emit_diagnostics(err: &mut dyn Write, diagnostics: &[Diagnostic], sources: &SourceMap) {
    let mut emitter = TextEmitter::new(err, sources);
    emitter.emit_all(diagnostics);
    emitter.emit_summary(
        count_at_least(diagnostics, Severity::Error),
        diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count(),
    );
    emitter.flush();
}

fn usage_error(err: &mut dyn Write, message: &str, usage: &str) -> io::Result<Status> {
    writeln!(err, "error: {message}")?;
    writeln!(err, "Usage: {usage}")?;
    Ok(Status::Failure)
}
