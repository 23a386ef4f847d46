//! Core diagnostic types.
//!
//! Defines [`Diagnostic`], [`Label`] and [`Severity`], the building blocks
//! the translator, scanner, macro layer and parser use to report problems.

use std::fmt;

use hal_ir::{Location, Token};

use crate::ErrorCode;

/// How bad a diagnostic is.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    /// Informational; never affects the outcome.
    Info,
    Warning,
    /// Recoverable: the unit keeps compiling.
    Error,
    /// The unit is aborted.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// A labeled location with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub location: Location,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(location: Location, message: impl Into<String>) -> Self {
        Label {
            location,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(location: Location, message: impl Into<String>) -> Self {
        Label {
            location,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with everything needed to render it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Create a diagnostic at the code's default severity.
    #[cold]
    pub fn new(code: ErrorCode) -> Self {
        Self::new_with_severity(code, code.default_severity())
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    #[cold]
    pub fn info(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Info)
    }

    #[cold]
    pub fn fatal(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Fatal)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(location, message));
        self
    }

    pub fn with_secondary_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(location, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Label a token, attributing it to every macro expansion it came from.
    ///
    /// The primary label sits where the user can see it (the outermost call
    /// for expanded tokens). Each expansion level adds a secondary label at
    /// its call site and a note naming the macro definition.
    pub fn with_token_label(mut self, token: &Token, message: impl Into<String>) -> Self {
        self.labels
            .push(Label::primary(token.reported_location(), message));
        if let Some(origin) = &token.origin {
            for site in origin.chain() {
                self.labels.push(Label::secondary(
                    site.call_site,
                    format!("in expansion of `{}`", site.macro_name),
                ));
                self.notes.push(format!(
                    "macro `{}` is defined at {}",
                    site.macro_name, site.definition
                ));
            }
        }
        self
    }

    pub fn primary_location(&self) -> Option<Location> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.location)
    }

    /// Recoverable or fatal error (not info/warning).
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {}: {}", marker, label.location, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
