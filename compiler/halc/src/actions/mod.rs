//! Pass 1 semantic actions.
//!
//! Only what the front end itself needs is interpreted here: `REPLACE`
//! statements become macro definitions the moment they are reduced, so the
//! next token the scanner produces already sees them. Every other
//! reduction is passed through, and optionally recorded.

use std::sync::Arc;

use hal_diagnostic::{Aborted, DiagnosticSink};
use hal_grammar::ParseTables;
use hal_ir::{ProductionId, SymbolId, Token};
use hal_macro::{MacroDefinition, SharedMacroTable};
use hal_parse::{SemanticActions, StackSlot};
use tracing::debug;

/// Value carried for a reduced nonterminal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Pass1Value {
    #[default]
    Empty,
    /// Identifiers collected by a list production, in source order.
    Names(Vec<Token>),
    /// A macro name with its formal parameters.
    Head { name: Token, parameters: Vec<Token> },
}

/// Nonterminals of the `REPLACE` statement, if the grammar has them.
#[derive(Copy, Clone, Debug)]
struct ReplaceSymbols {
    statement: SymbolId,
    head: SymbolId,
    arguments: SymbolId,
}

impl ReplaceSymbols {
    fn find(tables: &ParseTables) -> Option<Self> {
        let vocabulary = tables.vocabulary();
        Some(ReplaceSymbols {
            statement: vocabulary.lookup("<REPLACE STMT>")?,
            head: vocabulary.lookup("<REPLACE HEAD>")?,
            arguments: vocabulary.lookup("<ARG LIST>")?,
        })
    }
}

pub struct Pass1Actions {
    tables: Arc<ParseTables>,
    replace: Option<ReplaceSymbols>,
    macros: SharedMacroTable,
    max_parameters: usize,
    trace: Option<Vec<ProductionId>>,
    defined: usize,
}

impl Pass1Actions {
    pub fn new(tables: Arc<ParseTables>, macros: SharedMacroTable, max_parameters: usize) -> Self {
        let replace = ReplaceSymbols::find(&tables);
        Pass1Actions {
            tables,
            replace,
            macros,
            max_parameters,
            trace: None,
            defined: 0,
        }
    }

    /// Record every reduction, in order.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    pub fn macros(&self) -> &SharedMacroTable {
        &self.macros
    }

    /// `REPLACE` statements processed so far.
    pub fn definitions(&self) -> usize {
        self.defined
    }

    pub fn trace(&self) -> &[ProductionId] {
        self.trace.as_deref().unwrap_or_default()
    }

    pub fn take_trace(&mut self) -> Vec<ProductionId> {
        self.trace.as_mut().map(std::mem::take).unwrap_or_default()
    }

    fn define(&mut self, children: Vec<StackSlot<Pass1Value>>, sink: &mut dyn DiagnosticSink) {
        // REPLACE <REPLACE HEAD> BY <TEXT>
        let mut slots = children.into_iter();
        let (Some(_), Some(StackSlot::Value(head)), Some(_), Some(StackSlot::Token(text))) =
            (slots.next(), slots.next(), slots.next(), slots.next())
        else {
            debug!("REPLACE statement without its parts; nothing defined");
            return;
        };
        let Pass1Value::Head { name, parameters } = head else {
            return;
        };

        let definition = MacroDefinition::new(name.text, text.text, name.location)
            .with_parameters(parameters.into_iter().map(|p| p.text));
        self.macros
            .write()
            .define(definition, self.max_parameters, sink);
        self.defined += 1;
    }
}

fn names(children: Vec<StackSlot<Pass1Value>>, identifier: SymbolId) -> Pass1Value {
    let mut collected = Vec::new();
    for slot in children {
        match slot {
            StackSlot::Value(Pass1Value::Names(more)) => collected.extend(more),
            StackSlot::Token(token) if token.symbol == identifier => collected.push(token),
            _ => {}
        }
    }
    Pass1Value::Names(collected)
}

fn head(children: Vec<StackSlot<Pass1Value>>) -> Pass1Value {
    // <IDENTIFIER> | <IDENTIFIER> ( <ARG LIST> )
    let mut slots = children.into_iter();
    let Some(StackSlot::Token(name)) = slots.next() else {
        return Pass1Value::Empty;
    };
    let parameters = slots
        .find_map(|slot| match slot.into_value() {
            Some(Pass1Value::Names(names)) => Some(names),
            _ => None,
        })
        .unwrap_or_default();
    Pass1Value::Head { name, parameters }
}

impl SemanticActions for Pass1Actions {
    type Value = Pass1Value;

    fn on_reduce(
        &mut self,
        production: ProductionId,
        children: Vec<StackSlot<Pass1Value>>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Pass1Value, Aborted> {
        if let Some(trace) = &mut self.trace {
            trace.push(production);
        }
        let Some(replace) = self.replace else {
            return Ok(Pass1Value::Empty);
        };

        let lhs = self.tables.production_lhs(production);
        let value = if lhs == replace.arguments {
            names(children, self.tables.vocabulary().identifier())
        } else if lhs == replace.head {
            head(children)
        } else {
            if lhs == replace.statement {
                self.define(children, sink);
            }
            Pass1Value::Empty
        };
        Ok(value)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
