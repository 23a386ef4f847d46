//! Compile options and their command-line spelling.

use std::path::PathBuf;

use hal_lexer::LineFormat;
use hal_macro::ExpansionLimits;
use hal_parse::DEFAULT_STACK_LIMIT;

/// Settings for one compilation unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Card images (control column) or free-form lines.
    pub line_format: LineFormat,
    /// Most macro expansions active at once.
    pub macro_depth_limit: usize,
    /// Most formal parameters a `REPLACE` definition may declare.
    pub max_parameters: usize,
    /// Most states the parse stack may hold.
    pub parse_stack_limit: usize,
    /// Errors tolerated before the unit is abandoned (0 = unlimited).
    pub error_limit: usize,
    /// Directory searched for `INCLUDE` members.
    pub include_library: Option<PathBuf>,
    /// Record every reduction in the compilation report.
    pub trace_reductions: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        let limits = ExpansionLimits::default();
        CompileOptions {
            line_format: LineFormat::Cards,
            macro_depth_limit: limits.depth,
            max_parameters: limits.max_parameters,
            parse_stack_limit: DEFAULT_STACK_LIMIT,
            error_limit: 0,
            include_library: None,
            trace_reductions: false,
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn with_line_format(mut self, format: LineFormat) -> Self {
        self.line_format = format;
        self
    }

    #[must_use]
    pub fn with_macro_depth_limit(mut self, limit: usize) -> Self {
        self.macro_depth_limit = limit;
        self
    }

    #[must_use]
    pub fn with_max_parameters(mut self, limit: usize) -> Self {
        self.max_parameters = limit;
        self
    }

    #[must_use]
    pub fn with_parse_stack_limit(mut self, limit: usize) -> Self {
        self.parse_stack_limit = limit;
        self
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    #[must_use]
    pub fn with_include_library(mut self, directory: impl Into<PathBuf>) -> Self {
        self.include_library = Some(directory.into());
        self
    }

    #[must_use]
    pub fn with_trace_reductions(mut self, trace: bool) -> Self {
        self.trace_reductions = trace;
        self
    }

    /// Limits handed to the macro expander.
    pub fn expansion_limits(&self) -> ExpansionLimits {
        ExpansionLimits {
            depth: self.macro_depth_limit,
            max_parameters: self.max_parameters,
        }
    }
}

/// A command-line flag that could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("`{flag}` expects a number, found `{value}`")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("`{0}` expects a value")]
    MissingValue(&'static str),
}

/// Arguments left after the compile options are taken out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub options: CompileOptions,
    pub positional: Vec<String>,
}

fn number(flag: &'static str, value: &str) -> Result<usize, OptionError> {
    value.parse().map_err(|_| OptionError::InvalidNumber {
        flag,
        value: value.to_owned(),
    })
}

/// Apply `--flag` and `--flag=value` arguments to the default options.
///
/// Anything not starting with `-` is positional. A lone `-` is positional
/// too, so it can name standard input.
pub fn parse_compile_options(args: &[String]) -> Result<ParsedArgs, OptionError> {
    let mut parsed = ParsedArgs::default();
    let options = &mut parsed.options;

    for arg in args {
        if arg == "--free" {
            options.line_format = LineFormat::Free;
        } else if arg == "--cards" {
            options.line_format = LineFormat::Cards;
        } else if arg == "--trace" {
            options.trace_reductions = true;
        } else if let Some(value) = arg.strip_prefix("--macro-depth=") {
            options.macro_depth_limit = number("--macro-depth", value)?;
        } else if let Some(value) = arg.strip_prefix("--max-params=") {
            options.max_parameters = number("--max-params", value)?;
        } else if let Some(value) = arg.strip_prefix("--stack=") {
            options.parse_stack_limit = number("--stack", value)?;
        } else if let Some(value) = arg.strip_prefix("--error-limit=") {
            options.error_limit = number("--error-limit", value)?;
        } else if let Some(dir) = arg.strip_prefix("--lib=") {
            if dir.is_empty() {
                return Err(OptionError::MissingValue("--lib"));
            }
            options.include_library = Some(PathBuf::from(dir));
        } else if arg.starts_with('-') && arg != "-" {
            return Err(OptionError::UnknownFlag(arg.clone()));
        } else {
            parsed.positional.push(arg.clone());
        }
    }

    Ok(parsed)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
