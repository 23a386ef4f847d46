//! The `explain` command: describe a diagnostic code.

use std::io::{self, Write};

use hal_diagnostic::ErrorCode;

use super::{finish, usage_error, Status};

const USAGE: &str = "halc explain <code>   (e.g. E2001)";

/// Print what a code means, or list every code when none is given.
pub fn explain_command(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Status {
    finish(run(args, out, err))
}

fn run(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> io::Result<Status> {
    match args {
        [] => {
            for code in ErrorCode::ALL {
                writeln!(
                    out,
                    "{code}  {:<7}  {}",
                    code.default_severity().to_string(),
                    code.description()
                )?;
            }
            Ok(Status::Success)
        }
        [code_str] => {
            let Ok(code) = code_str.parse::<ErrorCode>() else {
                writeln!(err, "Unknown error code: {code_str}")?;
                writeln!(err)?;
                writeln!(err, "Codes have the format EXXXX where X is a digit.")?;
                writeln!(err, "Examples: E0001, E1002, E2001")?;
                return Ok(Status::Failure);
            };
            writeln!(out, "{code}: {}", code.description())?;
            writeln!(out, "  severity: {}", code.default_severity())?;
            writeln!(out, "  stage: {}", stage(code))?;
            Ok(Status::Success)
        }
        [_, extra, ..] => usage_error(err, &format!("unexpected argument `{extra}`"), USAGE),
    }
}

fn stage(code: ErrorCode) -> &'static str {
    if code.is_macro() {
        "macro expansion"
    } else if code.is_syntax() {
        "parsing"
    } else if code.as_str().starts_with("E0") {
        "character translation and scanning"
    } else {
        "compiler"
    }
}
