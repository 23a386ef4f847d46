//! HAL/S Pass 1 command line.

use std::io::{self, Write};
use std::process::ExitCode;

use halc::commands::{explain_command, lex_command, parse_command, tables_command, Status};

fn main() -> ExitCode {
    halc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::SUCCESS;
    };
    let rest = &args[2..];

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let status = match command.as_str() {
        "parse" => parse_command(rest, &mut out, &mut err),
        "lex" => lex_command(rest, &mut out, &mut err),
        "tables" => tables_command(rest, &mut out, &mut err),
        "explain" | "--explain" => explain_command(rest, &mut out, &mut err),
        "help" | "--help" | "-h" => {
            print_usage();
            Status::Success
        }
        "version" | "--version" | "-V" => {
            println!("halc {}", env!("CARGO_PKG_VERSION"));
            Status::Success
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            Status::Failure
        }
    };
    let _ = out.flush();
    status.into()
}

fn print_usage() {
    println!("HAL/S compiler, Pass 1 (scanning, macro expansion and parsing)");
    println!();
    println!("Usage: halc <command> [options]");
    println!();
    println!("Commands:");
    println!("  parse <file>         Compile one unit and report the parse");
    println!("  lex <file>           List the scanner's tokens");
    println!("  tables               Summarise the HAL/S parse tables");
    println!("  explain [code]       Describe a diagnostic code (e.g. E2001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Source options:");
    println!("  --cards              Read card images with a control column (default)");
    println!("  --free               Read free-format lines");
    println!("  --lib=<dir>          Directory searched by INCLUDE directives");
    println!();
    println!("Limits:");
    println!("  --macro-depth=<n>    Maximum macro expansion nesting (default 8)");
    println!("  --max-params=<n>     Maximum macro parameters (default 12)");
    println!("  --stack=<n>          Maximum parse stack depth (default 75)");
    println!("  --error-limit=<n>    Abort after n errors (default 0, no limit)");
    println!();
    println!("Parse options:");
    println!("  --trace              List every reduction in order");
    println!();
    println!("Tables options:");
    println!("  --grammar            List the productions");
    println!("  --dump               List every state's actions");
    println!();
    println!("Logging:");
    println!("  HALC_LOG=<filter>    Enable tracing output (e.g. hal_parse=debug)");
    println!("  HALC_LOG_TREE=1      Indented span output");
}
