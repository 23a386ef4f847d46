//! The `tables` command: summarise the built-in HAL/S parse tables.

use std::io::{self, Write};

use hal_grammar::reference::hal_language;
use hal_ir::ProductionId;

use super::{finish, usage_error, Status};

const USAGE: &str = "halc tables [--grammar] [--dump]";

/// Print table sizes, conflicts and optionally the grammar and every state.
pub fn tables_command(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Status {
    finish(run(args, out, err))
}

fn run(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> io::Result<Status> {
    let mut dump = false;
    let mut grammar = false;
    for arg in args {
        match arg.as_str() {
            "--dump" => dump = true,
            "--grammar" => grammar = true,
            other => return usage_error(err, &format!("unknown option `{other}`"), USAGE),
        }
    }

    let language = match hal_language() {
        Ok(language) => language,
        Err(e) => {
            writeln!(err, "error: {e}")?;
            return Ok(Status::Failure);
        }
    };
    let sizes = language.tables.sizes();
    writeln!(out, "HAL/S parse tables")?;
    writeln!(out, "  Productions: {}", sizes.productions)?;
    writeln!(out, "  States: {}", sizes.states)?;
    writeln!(out, "  Read entries: {}", sizes.reads)?;
    writeln!(out, "  Lookahead entries: {}", sizes.lookaheads)?;
    writeln!(out, "  Apply entries: {}", sizes.applies)?;
    writeln!(out, "  Conflicts resolved: {}", language.report.conflicts.len())?;
    for conflict in &language.report.conflicts {
        writeln!(out, "    {conflict}")?;
    }

    if grammar {
        writeln!(out)?;
        let productions =
            (0..language.grammar.production_count()).filter_map(ProductionId::from_index);
        for production in productions {
            writeln!(out, "{:>4}  {}", production.raw(), language.grammar.display(production))?;
        }
    }
    if dump {
        writeln!(out)?;
        write!(out, "{}", language.tables.dump())?;
    }
    Ok(Status::Success)
}
