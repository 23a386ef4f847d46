//! `parse` and `lex`: run the front end over one file and list what it saw.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use hal_diagnostic::{DiagnosticConfig, DiagnosticQueue};
use hal_grammar::reference::hal_language;
use hal_lexer::{DirectoryLibrary, Scanner, SourceReader};

use super::{emit_diagnostics, finish, usage_error, Status};
use crate::compile::{compile_file, CompilationReport};
use crate::options::{parse_compile_options, CompileOptions};

const PARSE_USAGE: &str = "halc parse <file> [--free] [--trace] [--lib=DIR] [--stack=N] \
                           [--macro-depth=N] [--max-params=N] [--error-limit=N]";
const LEX_USAGE: &str = "halc lex <file> [--free] [--lib=DIR] [--error-limit=N]";

/// The single file argument and the options around it.
fn file_and_options(
    args: &[String],
    usage: &str,
    err: &mut dyn Write,
) -> io::Result<Option<(String, CompileOptions)>> {
    let parsed = match parse_compile_options(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            usage_error(err, &e.to_string(), usage)?;
            return Ok(None);
        }
    };
    match parsed.positional.as_slice() {
        [file] => Ok(Some((file.clone(), parsed.options))),
        [] => {
            usage_error(err, "missing file path", usage)?;
            Ok(None)
        }
        [_, extra, ..] => {
            usage_error(err, &format!("unexpected argument `{extra}`"), usage)?;
            Ok(None)
        }
    }
}

/// Compile a file and print how far it got.
pub fn parse_command(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Status {
    finish(run_parse(args, out, err))
}

fn run_parse(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> io::Result<Status> {
    let Some((path, options)) = file_and_options(args, PARSE_USAGE, err)? else {
        return Ok(Status::Failure);
    };
    let report = match compile_file(Path::new(&path), &options) {
        Ok(report) => report,
        Err(e) => {
            writeln!(err, "error: {e}")?;
            return Ok(Status::Failure);
        }
    };

    emit_diagnostics(err, &report.diagnostics, &report.sources);
    write_report(out, &path, &report)?;
    Ok(Status::from_clean(report.is_clean()))
}

fn write_report(out: &mut dyn Write, path: &str, report: &CompilationReport) -> io::Result<()> {
    let verdict = if report.is_accepted() {
        "accepted"
    } else {
        "aborted"
    };
    let stats = &report.stats;
    writeln!(out, "Parse result for '{path}': {verdict}")?;
    writeln!(out, "  Tokens: {}", stats.tokens)?;
    writeln!(out, "  Shifts: {}", stats.shifts)?;
    writeln!(out, "  Reductions: {}", stats.reductions)?;
    writeln!(out, "  Syntax errors: {}", stats.syntax_errors)?;
    writeln!(out, "  Recoveries: {}", stats.recoveries)?;
    writeln!(out, "  Deepest stack: {}", stats.max_depth)?;

    if !report.macros.is_empty() {
        writeln!(out)?;
        writeln!(out, "Macros: {}", report.macros.join(", "))?;
        for used in &report.macro_uses {
            writeln!(
                out,
                "  {} at {}",
                used.name,
                report.sources.describe(used.location())
            )?;
        }
    }

    if !report.trace.is_empty() {
        if let Ok(language) = hal_language() {
            writeln!(out)?;
            writeln!(out, "Reductions:")?;
            for &production in &report.trace {
                writeln!(
                    out,
                    "  {:>4}  {}",
                    production.raw(),
                    language.grammar.display(production)
                )?;
            }
        }
    }
    Ok(())
}

/// List the tokens the scanner produces, before macro expansion.
pub fn lex_command(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Status {
    finish(run_lex(args, out, err))
}

fn run_lex(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> io::Result<Status> {
    let Some((path, options)) = file_and_options(args, LEX_USAGE, err)? else {
        return Ok(Status::Failure);
    };
    let language = match hal_language() {
        Ok(language) => language,
        Err(e) => {
            writeln!(err, "error: {e}")?;
            return Ok(Status::Failure);
        }
    };
    let reader = match SourceReader::open(Path::new(&path), options.line_format) {
        Ok(reader) => reader,
        Err(e) => {
            writeln!(err, "error: {e}")?;
            return Ok(Status::Failure);
        }
    };
    let reader = match &options.include_library {
        Some(dir) => reader.with_library(Box::new(DirectoryLibrary::new(dir))),
        None => reader,
    };

    let vocabulary = Arc::clone(language.tables.vocabulary());
    let end_of_file = vocabulary.end_of_file();
    let mut scanner = Scanner::new(reader, Arc::clone(&vocabulary));
    let config = DiagnosticConfig::default().with_error_limit(options.error_limit);
    let mut queue = DiagnosticQueue::with_config(config);
    let mut tokens = Vec::new();
    while let Ok(token) = scanner.next_token(&mut queue) {
        if token.symbol == end_of_file {
            break;
        }
        tokens.push(token);
    }
    let sources = scanner.into_feed().into_source_map();

    writeln!(out, "Tokens for '{path}' ({} tokens):", tokens.len())?;
    for token in &tokens {
        writeln!(
            out,
            "  {:<16} {:<20} {}",
            sources.describe(token.location),
            vocabulary.name(token.symbol),
            token.text
        )?;
    }
    emit_diagnostics(err, queue.diagnostics(), &sources);
    Ok(Status::from_clean(queue.error_count() == 0))
}
