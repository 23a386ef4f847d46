//! Error codes for all front-end diagnostics.
//!
//! The first digit names the stage that reports the problem.

use std::fmt;

use crate::Severity;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates the stage:
/// - E0xxx: character translation and lexical errors
/// - E1xxx: macro expansion errors
/// - E2xxx: syntax errors
/// - E3xxx: input and include handling
/// - E9xxx: resource limits and internal failures
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Character / lexical (E0xxx)
    /// Character with no internal code
    E0001,
    /// Unterminated character string
    E0002,
    /// Malformed number
    E0003,
    /// Escape level above two
    E0004,
    /// Escape sequence with no defined result
    E0005,
    /// Unterminated comment
    E0006,
    /// Unterminated replace text
    E0007,
    /// Lexeme class missing from the vocabulary
    E0008,
    /// Identifier too long
    E0009,
    /// Character string too long
    E0010,
    /// Character cannot start a token
    E0011,

    // Macro expansion (E1xxx)
    /// Actual/formal parameter count mismatch
    E1001,
    /// Expansion nesting limit exceeded
    E1002,
    /// Expansion ended inside an unfinished invocation
    E1003,
    /// Argument list not closed before end of input
    E1004,
    /// Too many formal parameters
    E1005,
    /// Macro redefined
    E1006,
    /// Parameterised macro used without an argument list
    E1007,

    // Syntax (E2xxx)
    /// Unexpected token
    E2001,
    /// No synchronising point before end of input
    E2002,
    /// Parse stack overflow
    E2003,

    // Input (E3xxx)
    /// Source or member could not be opened
    E3001,
    /// Illegal card type
    E3002,
    /// Unsupported card type
    E3003,
    /// Directive ignored
    E3004,
    /// INCLUDE inside an included member
    E3005,
    /// Read failure
    E3006,

    // Limits and internal (E9xxx)
    /// Error limit reached
    E9001,
    /// Parse tables lack an entry the driver needs
    E9002,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E0010,
        ErrorCode::E0011,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E0011 => "E0011",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Severity a diagnostic with this code gets unless overridden.
    pub fn default_severity(&self) -> Severity {
        match self {
            ErrorCode::E1002
            | ErrorCode::E1003
            | ErrorCode::E1004
            | ErrorCode::E2002
            | ErrorCode::E2003
            | ErrorCode::E3006
            | ErrorCode::E9001
            | ErrorCode::E9002 => Severity::Fatal,
            ErrorCode::E1006 | ErrorCode::E3003 => Severity::Warning,
            ErrorCode::E3004 => Severity::Info,
            _ => Severity::Error,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_macro(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_syntax(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// One-line description, used by `halc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "character has no internal code",
            ErrorCode::E0002 => "unterminated character string",
            ErrorCode::E0003 => "malformed number",
            ErrorCode::E0004 => "escape level above two",
            ErrorCode::E0005 => "escape sequence with no defined result",
            ErrorCode::E0006 => "unterminated comment",
            ErrorCode::E0007 => "unterminated replace text",
            ErrorCode::E0008 => "lexeme class missing from the vocabulary",
            ErrorCode::E0009 => "identifier too long",
            ErrorCode::E0010 => "character string too long",
            ErrorCode::E0011 => "character cannot start a token",
            ErrorCode::E1001 => "actual and formal parameter counts differ",
            ErrorCode::E1002 => "macro expansion nesting limit exceeded",
            ErrorCode::E1003 => "macro expansion ended inside an unfinished invocation",
            ErrorCode::E1004 => "macro argument list not closed before end of input",
            ErrorCode::E1005 => "too many formal parameters",
            ErrorCode::E1006 => "macro redefined",
            ErrorCode::E1007 => "parameterised macro used without an argument list",
            ErrorCode::E2001 => "unexpected token",
            ErrorCode::E2002 => "no synchronising point before end of input",
            ErrorCode::E2003 => "parse stack overflow",
            ErrorCode::E3001 => "source or member could not be opened",
            ErrorCode::E3002 => "illegal card type",
            ErrorCode::E3003 => "unsupported card type",
            ErrorCode::E3004 => "directive ignored",
            ErrorCode::E3005 => "INCLUDE inside an included member",
            ErrorCode::E3006 => "read failure",
            ErrorCode::E9001 => "error limit reached",
            ErrorCode::E9002 => "inconsistent parse tables",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a code like `"E2001"`, case-insensitively.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
