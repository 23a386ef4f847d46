use std::fmt;

use hal_ir::StateId;

use super::ParseTables;

/// Listing of every state's rows, one state per paragraph.
pub struct DumpTables<'a> {
    tables: &'a ParseTables,
}

impl<'a> DumpTables<'a> {
    pub(super) fn new(tables: &'a ParseTables) -> Self {
        DumpTables { tables }
    }
}

impl fmt::Display for DumpTables<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables;
        let vocabulary = tables.vocabulary();
        for state in (0..tables.state_count()).filter_map(StateId::from_index) {
            writeln!(f, "state {state}")?;
            for (symbol, target) in tables.reads(state) {
                let verb = if tables.is_terminal(symbol) { "shift" } else { "goto" };
                writeln!(f, "  {:<24} {verb} {target}", vocabulary.name(symbol))?;
            }
            for (symbol, production) in tables.lookaheads(state) {
                writeln!(f, "  {:<24} reduce {production}", vocabulary.name(symbol))?;
            }
            match tables.apply(state) {
                [] => {}
                [only] if tables.default_reduction(state).is_some() => {
                    writeln!(f, "  {:<24} reduce {only}", "(default)")?;
                }
                apply => {
                    let list: Vec<String> = apply.iter().map(ToString::to_string).collect();
                    writeln!(f, "  apply {}", list.join(" "))?;
                }
            }
        }
        Ok(())
    }
}
